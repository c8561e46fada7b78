// Edit actions for the form builder.
//
// Every change the builder UI can make to the form goes through one of these.
// `apply` reports whether the state actually changed so the session only
// records real edits in history.

use formcraft_model::{templates, BuilderState, FieldPatch, FieldType, FormField};
use tracing::{debug, trace, warn};

pub trait Edit {
    fn apply(&self, state: &mut BuilderState) -> bool;

    fn name(&self) -> &str;
}

/// Drop a new field from the palette at the end of the form.
#[derive(Debug, Clone)]
pub struct AddField {
    pub field_type: FieldType,
}

impl AddField {
    pub fn new(field_type: FieldType) -> Self {
        Self { field_type }
    }
}

impl Edit for AddField {
    fn apply(&self, state: &mut BuilderState) -> bool {
        let field = FormField::new(self.field_type, state.fields.len() as u32);
        debug!(field_id = %field.id, field_type = %self.field_type, "adding field");
        state.fields.push(field);
        true
    }

    fn name(&self) -> &str {
        "Add field"
    }
}

#[derive(Debug, Clone)]
pub struct UpdateField {
    pub id: String,
    pub patch: FieldPatch,
}

impl Edit for UpdateField {
    fn apply(&self, state: &mut BuilderState) -> bool {
        match state.field_mut(&self.id) {
            Some(field) => {
                let changed = field.apply_patch(&self.patch);
                trace!(field_id = %self.id, changed, "field patched");
                changed
            }
            None => {
                warn!(field_id = %self.id, "update for unknown field");
                false
            }
        }
    }

    fn name(&self) -> &str {
        "Update field"
    }
}

#[derive(Debug, Clone)]
pub struct RemoveField {
    pub id: String,
}

impl Edit for RemoveField {
    fn apply(&self, state: &mut BuilderState) -> bool {
        let Some(index) = state.position(&self.id) else {
            warn!(field_id = %self.id, "remove for unknown field");
            return false;
        };

        state.fields.remove(index);
        state.renumber();
        debug!(field_id = %self.id, index, "field removed");
        true
    }

    fn name(&self) -> &str {
        "Remove field"
    }
}

/// Drag-and-drop reorder: take the field at `from` and insert it at `to`.
#[derive(Debug, Clone)]
pub struct MoveField {
    pub from: usize,
    pub to: usize,
}

impl Edit for MoveField {
    fn apply(&self, state: &mut BuilderState) -> bool {
        let len = state.fields.len();
        if self.from >= len || self.to >= len {
            warn!(from = self.from, to = self.to, len, "move out of range");
            return false;
        }
        if self.from == self.to {
            return false;
        }

        let field = state.fields.remove(self.from);
        state.fields.insert(self.to, field);
        state.renumber();
        debug!(from = self.from, to = self.to, "field moved");
        true
    }

    fn name(&self) -> &str {
        "Move field"
    }
}

#[derive(Debug, Clone)]
pub struct SetTitle(pub String);

impl Edit for SetTitle {
    fn apply(&self, state: &mut BuilderState) -> bool {
        if state.title == self.0 {
            return false;
        }
        state.title = self.0.clone();
        true
    }

    fn name(&self) -> &str {
        "Edit title"
    }
}

#[derive(Debug, Clone)]
pub struct SetDescription(pub String);

impl Edit for SetDescription {
    fn apply(&self, state: &mut BuilderState) -> bool {
        if state.description == self.0 {
            return false;
        }
        state.description = self.0.clone();
        true
    }

    fn name(&self) -> &str {
        "Edit description"
    }
}

#[derive(Debug, Clone)]
pub struct SetWebhook {
    pub url: String,
    pub enabled: bool,
}

impl Edit for SetWebhook {
    fn apply(&self, state: &mut BuilderState) -> bool {
        if state.webhook_url == self.url && state.webhook_enabled == self.enabled {
            return false;
        }
        state.webhook_url = self.url.clone();
        state.webhook_enabled = self.enabled;
        debug!(enabled = self.enabled, "webhook settings changed");
        true
    }

    fn name(&self) -> &str {
        "Webhook settings"
    }
}

/// Replace fields, title and description with a catalog template.
/// Webhook settings are left as they are.
#[derive(Debug, Clone)]
pub struct ApplyTemplate {
    pub template_id: String,
}

impl Edit for ApplyTemplate {
    fn apply(&self, state: &mut BuilderState) -> bool {
        let template = match templates::by_id(&self.template_id) {
            Ok(t) => t,
            Err(err) => {
                warn!(error = %err, "template not applied");
                return false;
            }
        };

        let seeded = template.to_builder_state();
        if state.fields == seeded.fields
            && state.title == seeded.title
            && state.description == seeded.description
        {
            trace!(template = %self.template_id, "template already applied");
            return false;
        }
        state.fields = seeded.fields;
        state.title = seeded.title;
        state.description = seeded.description;
        debug!(template = %self.template_id, "template applied");
        true
    }

    fn name(&self) -> &str {
        "Apply template"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_fields(n: usize) -> BuilderState {
        let mut state = BuilderState::default();
        for _ in 0..n {
            AddField::new(FieldType::Text).apply(&mut state);
        }
        state
    }

    #[test]
    fn test_add_field_orders_by_position() {
        let state = with_fields(3);
        let orders: Vec<u32> = state.fields.iter().map(|f| f.order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
    }

    #[test]
    fn test_move_field() {
        let mut state = with_fields(3);
        let ids: Vec<String> = state.fields.iter().map(|f| f.id.clone()).collect();

        assert!(MoveField { from: 0, to: 2 }.apply(&mut state));
        let moved: Vec<&str> = state.fields.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(moved, vec![ids[1].as_str(), ids[2].as_str(), ids[0].as_str()]);
        assert_eq!(state.fields[2].order, 2);

        assert!(!MoveField { from: 1, to: 1 }.apply(&mut state));
        assert!(!MoveField { from: 0, to: 3 }.apply(&mut state));
    }

    #[test]
    fn test_remove_renumbers() {
        let mut state = with_fields(3);
        let first = state.fields[0].id.clone();
        assert!(RemoveField { id: first.clone() }.apply(&mut state));
        assert_eq!(state.fields.len(), 2);
        assert_eq!(state.fields[0].order, 0);
        assert!(!RemoveField { id: first }.apply(&mut state));
    }

    #[test]
    fn test_unchanged_edits_report_false() {
        let mut state = BuilderState::default();
        assert!(!SetTitle(state.title.clone()).apply(&mut state));
        assert!(!SetWebhook {
            url: String::new(),
            enabled: false
        }
        .apply(&mut state));
        assert!(!UpdateField {
            id: "missing".into(),
            patch: FieldPatch::default()
        }
        .apply(&mut state));
    }

    #[test]
    fn test_apply_template_keeps_webhook() {
        let mut state = BuilderState::default();
        state.webhook_url = "https://hooks.example.com".into();
        state.webhook_enabled = true;

        assert!(ApplyTemplate {
            template_id: "contact-form".into()
        }
        .apply(&mut state));
        assert_eq!(state.title, "Contact Form");
        assert_eq!(state.fields.len(), 5);
        assert!(state.webhook_enabled);

        assert!(!ApplyTemplate {
            template_id: "contact-form".into()
        }
        .apply(&mut state));

        assert!(!ApplyTemplate {
            template_id: "nope".into()
        }
        .apply(&mut state));
    }
}
