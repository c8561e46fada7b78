// Editor module for the FormCraft builder.

pub mod edits;
pub mod history;
pub mod session;
pub mod shortcuts;

pub use edits::{
    AddField, ApplyTemplate, Edit, MoveField, RemoveField, SetDescription, SetTitle, SetWebhook,
    UpdateField,
};
pub use history::{BuilderHistory, History, DEFAULT_MAX_STATES};
pub use session::EditorSession;
pub use shortcuts::{command_for, EditorCommand, KeyChord};
