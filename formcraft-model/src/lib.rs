//! formcraft-model: form schema, builder state and submission data for FormCraft.
//!
//! Design rules:
//! - The builder state is a plain value. Cloning it is a full structural copy.
//! - Field types are a closed set with lowercase wire tags.
//! - Limits are bounded by `FormLimits`, never hard-coded in validators.
//! - All structs are serializable for draft save/load.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Title given to a form that has not been named yet.
pub const DEFAULT_FORM_TITLE: &str = "Untitled Form";

/// Field types offered by the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Textarea,
    Email,
    Number,
    Select,
    Multiselect,
    Checkbox,
    Radio,
    Date,
    File,
    Phone,
    Url,
    Password,
    Rating,
    Signature,
    Time,
    Datetime,
    Color,
    Range,
}

impl FieldType {
    /// Palette order.
    pub const ALL: [FieldType; 19] = [
        FieldType::Text,
        FieldType::Textarea,
        FieldType::Email,
        FieldType::Number,
        FieldType::Select,
        FieldType::Multiselect,
        FieldType::Checkbox,
        FieldType::Radio,
        FieldType::Date,
        FieldType::File,
        FieldType::Phone,
        FieldType::Url,
        FieldType::Password,
        FieldType::Rating,
        FieldType::Signature,
        FieldType::Time,
        FieldType::Datetime,
        FieldType::Color,
        FieldType::Range,
    ];

    /// Wire tag, as stored in drafts.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Textarea => "textarea",
            FieldType::Email => "email",
            FieldType::Number => "number",
            FieldType::Select => "select",
            FieldType::Multiselect => "multiselect",
            FieldType::Checkbox => "checkbox",
            FieldType::Radio => "radio",
            FieldType::Date => "date",
            FieldType::File => "file",
            FieldType::Phone => "phone",
            FieldType::Url => "url",
            FieldType::Password => "password",
            FieldType::Rating => "rating",
            FieldType::Signature => "signature",
            FieldType::Time => "time",
            FieldType::Datetime => "datetime",
            FieldType::Color => "color",
            FieldType::Range => "range",
        }
    }

    /// Human readable palette label.
    pub fn label(&self) -> &'static str {
        match self {
            FieldType::Text => "Text Input",
            FieldType::Textarea => "Text Area",
            FieldType::Email => "Email Input",
            FieldType::Number => "Number Input",
            FieldType::Select => "Dropdown Select",
            FieldType::Multiselect => "Multi Select",
            FieldType::Checkbox => "Checkbox Group",
            FieldType::Radio => "Radio Group",
            FieldType::Date => "Date Picker",
            FieldType::File => "File Upload",
            FieldType::Phone => "Phone Number",
            FieldType::Url => "URL Input",
            FieldType::Password => "Password Input",
            FieldType::Rating => "Rating",
            FieldType::Signature => "Signature",
            FieldType::Time => "Time Picker",
            FieldType::Datetime => "Date & Time",
            FieldType::Color => "Color Picker",
            FieldType::Range => "Range Slider",
        }
    }

    /// Whether the field carries a list of choices.
    pub fn has_options(&self) -> bool {
        matches!(
            self,
            FieldType::Select | FieldType::Multiselect | FieldType::Checkbox | FieldType::Radio
        )
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ModelError::UnknownFieldType {
                tag: s.to_string(),
            })
    }
}

/// A single field definition inside a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    pub id: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub order: u32,
}

impl FormField {
    /// A fresh field as dropped from the palette.
    pub fn new(field_type: FieldType, order: u32) -> Self {
        Self {
            id: new_field_id(),
            field_type,
            label: format!("New {} field", field_type),
            placeholder: Some(String::new()),
            required: false,
            options: default_options(field_type),
            order,
        }
    }

    /// Apply a sparse patch. Returns true if anything changed.
    pub fn apply_patch(&mut self, patch: &FieldPatch) -> bool {
        let before = self.clone();

        if let Some(field_type) = patch.field_type {
            self.field_type = field_type;
            if !field_type.has_options() {
                self.options = None;
            } else if self.options.is_none() {
                self.options = default_options(field_type);
            }
        }
        if let Some(label) = &patch.label {
            self.label = label.clone();
        }
        if let Some(placeholder) = &patch.placeholder {
            self.placeholder = Some(placeholder.clone());
        }
        if let Some(required) = patch.required {
            self.required = required;
        }
        if let Some(options) = &patch.options {
            if self.field_type.has_options() {
                self.options = Some(options.clone());
            }
        }

        *self != before
    }
}

/// Generate a unique field id.
pub fn new_field_id() -> String {
    format!("field-{}", Uuid::new_v4().simple())
}

fn default_options(field_type: FieldType) -> Option<Vec<String>> {
    field_type
        .has_options()
        .then(|| vec!["Option 1".to_string(), "Option 2".to_string()])
}

/// Sparse field edits coming from the field editor panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldPatch {
    pub field_type: Option<FieldType>,
    pub label: Option<String>,
    pub placeholder: Option<String>,
    pub required: Option<bool>,
    pub options: Option<Vec<String>>,
}

/// The whole editable state of one form in progress.
///
/// This is the snapshot unit recorded by the editor's undo history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderState {
    pub fields: Vec<FormField>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub webhook_url: String,
    #[serde(default)]
    pub webhook_enabled: bool,
}

impl Default for BuilderState {
    fn default() -> Self {
        Self {
            fields: Vec::new(),
            title: DEFAULT_FORM_TITLE.to_string(),
            description: String::new(),
            webhook_url: String::new(),
            webhook_enabled: false,
        }
    }
}

impl BuilderState {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn field(&self, id: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn field_mut(&mut self, id: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.id == id)
    }

    /// Reset every field's `order` to its position in the list.
    pub fn renumber(&mut self) {
        for (i, field) in self.fields.iter_mut().enumerate() {
            field.order = i as u32;
        }
    }
}

/// Errors related to the form model.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown field type: {tag}")]
    UnknownFieldType { tag: String },

    #[error("unknown template id: {id}")]
    UnknownTemplate { id: String },
}

pub mod config;
pub mod draft;
pub mod export;
pub mod submission;
pub mod templates;
pub mod validation;

pub use config::{ConfigError, FormLimits};
pub use draft::{duplicate, load_draft, save_draft, DuplicateOptions, DRAFT_FILE_EXT};
pub use export::{export_csv, export_filename, export_json, filter_submissions, ExportFormat, ExportOptions};
pub use submission::{Submission, SubmissionError, SubmissionStats, SubmissionStatus};
pub use templates::FormTemplate;
pub use validation::{ValidationError, ValidationResult};
