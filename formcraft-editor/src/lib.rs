//! formcraft-editor: the editing core of the FormCraft form builder.
//!
//! - `editor::History` keeps a bounded undo/redo timeline of builder snapshots.
//! - `editor::EditorSession` owns the live form state and records every edit.
//! - Rendering and drag gestures live in the UI; this crate only sees edits.

pub mod config;
pub mod editor;

pub use config::{load_config, EditorConfig};
pub use editor::{BuilderHistory, EditorCommand, EditorSession, History, KeyChord};

use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber honouring `RUST_LOG` (default `info`).
/// Safe to call more than once; later calls do nothing.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_init_tracing_twice() {
        super::init_tracing();
        super::init_tracing();
        tracing::info!("tracing initialised");
    }
}
