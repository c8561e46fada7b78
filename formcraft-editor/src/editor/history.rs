// Undo/redo history module for the editor.
//
// A linear, bounded timeline of snapshots. Pushing after an undo discards the
// abandoned redo branch. Undo and redo arm a one-shot latch that swallows the
// next push, which is the push the editor issues when it writes the restored
// snapshot back into its live state.

use formcraft_model::BuilderState;
use std::collections::VecDeque;
use tracing::{debug, info, trace, warn};

pub const DEFAULT_MAX_STATES: usize = 50;

/// History over builder snapshots.
pub type BuilderHistory = History<BuilderState>;

#[derive(Debug, Clone, PartialEq)]
pub struct History<S> {
    states: VecDeque<S>,
    current_index: usize,
    max_states: usize,
    suppress_next_push: bool,
}

impl<S> History<S> {
    pub fn new(initial_state: S) -> Self {
        Self::with_max_states(initial_state, DEFAULT_MAX_STATES)
    }

    /// `max_states` below 1 is raised to 1 so the seed always fits.
    pub fn with_max_states(initial_state: S, max_states: usize) -> Self {
        if max_states == 0 {
            warn!("history capacity of 0 requested, using 1");
        }
        let max_states = max_states.max(1);
        info!(max_states, "creating history");

        let mut states = VecDeque::with_capacity(max_states.min(DEFAULT_MAX_STATES));
        states.push_back(initial_state);

        Self {
            states,
            current_index: 0,
            max_states,
            suppress_next_push: false,
        }
    }

    /// Record a new snapshot. Returns false when the push was absorbed by a
    /// preceding undo/redo.
    pub fn push(&mut self, state: S) -> bool {
        if self.suppress_next_push {
            self.suppress_next_push = false;
            trace!(cursor = self.current_index, "push absorbed after undo/redo");
            return false;
        }

        let discarded = self.states.len() - self.current_index - 1;
        self.states.truncate(self.current_index + 1);
        self.states.push_back(state);

        let mut evicted = 0;
        while self.states.len() > self.max_states {
            self.states.pop_front();
            evicted += 1;
        }
        self.current_index = self.states.len() - 1;

        debug!(
            cursor = self.current_index,
            len = self.states.len(),
            discarded,
            evicted,
            "history push"
        );
        true
    }

    /// Step back one snapshot. No-op at the start of history.
    pub fn undo(&mut self) -> Option<&S> {
        if !self.can_undo() {
            trace!("undo at start of history ignored");
            return None;
        }

        self.suppress_next_push = true;
        self.current_index -= 1;
        debug!(cursor = self.current_index, "undo");
        Some(self.current())
    }

    /// Step forward one snapshot. No-op at the end of history.
    pub fn redo(&mut self) -> Option<&S> {
        if !self.can_redo() {
            trace!("redo at end of history ignored");
            return None;
        }

        self.suppress_next_push = true;
        self.current_index += 1;
        debug!(cursor = self.current_index, "redo");
        Some(self.current())
    }

    pub fn current(&self) -> &S {
        &self.states[self.current_index]
    }

    pub fn can_undo(&self) -> bool {
        self.current_index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.current_index + 1 < self.states.len()
    }

    /// Number of snapshots held. Never zero.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn cursor(&self) -> usize {
        self.current_index
    }

    pub fn max_states(&self) -> usize {
        self.max_states
    }

    /// True between an undo/redo and the push it will swallow.
    pub fn is_suppressing(&self) -> bool {
        self.suppress_next_push
    }

    /// Oldest first.
    pub fn snapshots(&self) -> impl Iterator<Item = &S> {
        self.states.iter()
    }
}
