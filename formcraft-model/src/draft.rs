//! Local drafts of a form in progress, and form duplication.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::{new_field_id, BuilderState};

/// File extension recommended for saved drafts.
pub const DRAFT_FILE_EXT: &str = "form.json";

/// Save a builder state to disk as pretty JSON.
pub fn save_draft(path: impl AsRef<Path>, state: &BuilderState) -> anyhow::Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create parent dir: {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(state).context("serialize draft to json")?;
    fs::write(path, json).with_context(|| format!("write draft file: {}", path.display()))?;

    tracing::info!(path = %path.display(), fields = state.fields.len(), "draft saved");
    Ok(())
}

/// Load a builder state from disk.
pub fn load_draft(path: impl AsRef<Path>) -> anyhow::Result<BuilderState> {
    let path = path.as_ref();
    let data = fs::read_to_string(path)
        .with_context(|| format!("read draft file: {}", path.display()))?;
    let mut state: BuilderState = serde_json::from_str(&data).context("parse draft json")?;
    state.fields.sort_by_key(|f| f.order);

    tracing::info!(path = %path.display(), fields = state.fields.len(), "draft loaded");
    Ok(state)
}

/// What to carry over when duplicating a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateOptions {
    pub title: Option<String>,
    pub fields: bool,
    pub webhook: bool,
}

impl Default for DuplicateOptions {
    fn default() -> Self {
        Self {
            title: None,
            fields: true,
            webhook: false,
        }
    }
}

/// Copy a form. Field ids are regenerated so the copy never shares ids with
/// the source.
pub fn duplicate(source: &BuilderState, options: &DuplicateOptions) -> BuilderState {
    let title = options
        .title
        .clone()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| format!("{} (Copy)", source.title));

    let fields = if options.fields {
        source
            .fields
            .iter()
            .cloned()
            .map(|mut f| {
                f.id = new_field_id();
                f
            })
            .collect()
    } else {
        Vec::new()
    };

    let (webhook_url, webhook_enabled) = if options.webhook {
        (source.webhook_url.clone(), source.webhook_enabled)
    } else {
        (String::new(), false)
    };

    BuilderState {
        fields,
        title,
        description: source.description.clone(),
        webhook_url,
        webhook_enabled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FieldType, FormField};

    fn source() -> BuilderState {
        let mut state = BuilderState::new("Signup");
        state.description = "Join us".into();
        state.fields.push(FormField::new(FieldType::Email, 0));
        state.webhook_url = "https://hooks.example.com/x".into();
        state.webhook_enabled = true;
        state
    }

    #[test]
    fn test_duplicate_defaults() {
        let src = source();
        let copy = duplicate(&src, &DuplicateOptions::default());
        assert_eq!(copy.title, "Signup (Copy)");
        assert_eq!(copy.description, "Join us");
        assert_eq!(copy.fields.len(), 1);
        assert_ne!(copy.fields[0].id, src.fields[0].id);
        assert_eq!(copy.fields[0].label, src.fields[0].label);
        assert!(copy.webhook_url.is_empty());
        assert!(!copy.webhook_enabled);
    }

    #[test]
    fn test_duplicate_with_webhook_and_title() {
        let copy = duplicate(
            &source(),
            &DuplicateOptions {
                title: Some("Signup v2".into()),
                fields: false,
                webhook: true,
            },
        );
        assert_eq!(copy.title, "Signup v2");
        assert!(copy.fields.is_empty());
        assert!(copy.webhook_enabled);
    }
}
