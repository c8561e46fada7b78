// Editing session for one form in the builder.
//
// The session owns the live builder state and its undo history. Every
// mutation records a snapshot right after it lands. Undo and redo write the
// restored snapshot back into the live state and record it the same way; the
// history's latch swallows that push, so replaying never forks the timeline.

use std::path::Path;

use formcraft_model::validation::{validate_form, ValidationResult};
use formcraft_model::{load_draft, save_draft, BuilderState, FieldPatch, FieldType, FormField, FormLimits};
use tracing::{debug, info};

use super::edits::{
    AddField, ApplyTemplate, Edit, MoveField, RemoveField, SetDescription, SetTitle, SetWebhook,
    UpdateField,
};
use super::history::{BuilderHistory, History};
use super::shortcuts::{command_for, EditorCommand, KeyChord};
use crate::config::EditorConfig;

#[derive(Debug, Clone)]
pub struct EditorSession {
    state: BuilderState,
    history: BuilderHistory,
    selected: Option<String>,
    limits: FormLimits,
}

impl Default for EditorSession {
    fn default() -> Self {
        EditorSession::new(BuilderState::default())
    }
}

impl EditorSession {
    pub fn new(seed: BuilderState) -> Self {
        Self::with_config(seed, &EditorConfig::default())
    }

    pub fn with_config(seed: BuilderState, config: &EditorConfig) -> Self {
        info!(
            title = %seed.title,
            fields = seed.fields.len(),
            max_history = config.max_history,
            "starting editor session"
        );

        Self {
            history: History::with_max_states(seed.clone(), config.max_history),
            state: seed,
            selected: None,
            limits: config.limits,
        }
    }

    /// Resume editing a draft saved with `save_draft`.
    pub fn open_draft(path: impl AsRef<Path>, config: &EditorConfig) -> anyhow::Result<Self> {
        let seed = load_draft(path)?;
        Ok(Self::with_config(seed, config))
    }

    pub fn save_draft(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        save_draft(path, &self.state)
    }

    pub fn state(&self) -> &BuilderState {
        &self.state
    }

    pub fn history(&self) -> &BuilderHistory {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn selected(&self) -> Option<&FormField> {
        self.selected.as_deref().and_then(|id| self.state.field(id))
    }

    /// Selection is UI state only and is never recorded in history.
    pub fn select(&mut self, id: Option<&str>) -> bool {
        match id {
            Some(id) if self.state.field(id).is_none() => false,
            other => {
                self.selected = other.map(str::to_string);
                true
            }
        }
    }

    /// Apply an edit and record the result. Returns false when the edit
    /// changed nothing (nothing is recorded then).
    pub fn apply(&mut self, edit: &dyn Edit) -> bool {
        if !edit.apply(&mut self.state) {
            debug!(edit = edit.name(), "edit had no effect");
            return false;
        }

        debug!(edit = edit.name(), "edit applied");
        self.drop_stale_selection();
        self.record();
        true
    }

    /// Add a palette field and select it. Returns the new field's id.
    pub fn add_field(&mut self, field_type: FieldType) -> String {
        self.apply(&AddField::new(field_type));
        let id = self
            .state
            .fields
            .last()
            .map(|f| f.id.clone())
            .unwrap_or_default();
        self.selected = Some(id.clone());
        id
    }

    pub fn update_field(&mut self, id: &str, patch: FieldPatch) -> bool {
        self.apply(&UpdateField {
            id: id.to_string(),
            patch,
        })
    }

    pub fn remove_field(&mut self, id: &str) -> bool {
        self.apply(&RemoveField { id: id.to_string() })
    }

    /// Drop `id` onto the position currently held by `over_id`.
    pub fn move_field(&mut self, id: &str, over_id: &str) -> bool {
        match (self.state.position(id), self.state.position(over_id)) {
            (Some(from), Some(to)) => self.apply(&MoveField { from, to }),
            _ => false,
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> bool {
        self.apply(&SetTitle(title.into()))
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> bool {
        self.apply(&SetDescription(description.into()))
    }

    pub fn set_webhook(&mut self, url: impl Into<String>, enabled: bool) -> bool {
        self.apply(&SetWebhook {
            url: url.into(),
            enabled,
        })
    }

    pub fn apply_template(&mut self, template_id: &str) -> bool {
        self.apply(&ApplyTemplate {
            template_id: template_id.to_string(),
        })
    }

    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo() else {
            return false;
        };
        self.state = snapshot.clone();
        self.drop_stale_selection();
        self.record();
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo() else {
            return false;
        };
        self.state = snapshot.clone();
        self.drop_stale_selection();
        self.record();
        true
    }

    /// Run the command bound to `chord`, if any.
    pub fn handle_shortcut(&mut self, chord: &KeyChord) -> Option<EditorCommand> {
        let command = command_for(chord)?;
        let moved = match command {
            EditorCommand::Undo => self.undo(),
            EditorCommand::Redo => self.redo(),
        };
        debug!(?command, moved, "shortcut handled");
        Some(command)
    }

    pub fn validate(&self) -> ValidationResult {
        validate_form(&self.state, &self.limits)
    }

    fn record(&mut self) {
        self.history.push(self.state.clone());
    }

    fn drop_stale_selection(&mut self) {
        if let Some(id) = &self.selected {
            if self.state.field(id).is_none() {
                self.selected = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_edit_not_recorded() {
        let mut session = EditorSession::default();
        assert!(!session.set_title(formcraft_model::DEFAULT_FORM_TITLE));
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_undo_restores_live_state_and_keeps_redo() {
        let mut session = EditorSession::default();
        session.set_title("Contact Us");
        let id = session.add_field(FieldType::Email);
        assert_eq!(session.selected().map(|f| f.id.as_str()), Some(id.as_str()));

        assert!(session.undo());
        assert!(session.state().fields.is_empty());
        assert_eq!(session.state().title, "Contact Us");
        assert!(session.selected().is_none());
        assert!(session.can_redo());
        assert!(!session.history().is_suppressing());

        assert!(session.redo());
        assert_eq!(session.state().fields.len(), 1);
        assert!(!session.can_redo());
    }

    #[test]
    fn test_move_field_by_ids() {
        let mut session = EditorSession::default();
        let a = session.add_field(FieldType::Text);
        let b = session.add_field(FieldType::Date);
        assert!(session.move_field(&b, &a));
        assert_eq!(session.state().fields[0].id, b);
        assert!(!session.move_field(&b, "missing"));
    }

    #[test]
    fn test_select_rejects_unknown_field() {
        let mut session = EditorSession::default();
        let id = session.add_field(FieldType::Text);
        assert!(!session.select(Some("nope")));
        assert!(session.select(None));
        assert!(session.selected().is_none());
        assert!(session.select(Some(id.as_str())));
        assert_eq!(session.history().len(), 2);
    }
}
