//! Validation for form definitions, field inputs and submissions.
//!
//! Validators never fail fast: they collect every problem so the builder can
//! highlight all offending fields at once.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::OnceLock;
use url::Url;

use crate::{BuilderState, FieldType, FormField, FormLimits};

pub const FORM_TITLE_REQUIRED: &str = "Form title is required";
pub const FORM_TITLE_TOO_LONG: &str = "Form title is too long";
pub const FORM_DESCRIPTION_TOO_LONG: &str = "Form description is too long";
pub const FIELDS_REQUIRED: &str = "At least one field is required";
pub const TOO_MANY_FIELDS: &str = "Maximum number of fields reached";
pub const FIELD_LABEL_REQUIRED: &str = "Field label is required";
pub const FIELD_LABEL_TOO_LONG: &str = "Field label is too long";
pub const FIELD_PLACEHOLDER_TOO_LONG: &str = "Field placeholder is too long";
pub const OPTIONS_REQUIRED: &str = "At least one option is required for this field type";
pub const TOO_MANY_OPTIONS: &str = "Maximum number of options reached";
pub const OPTION_EMPTY: &str = "Option cannot be empty";
pub const OPTION_TOO_LONG: &str = "Option text is too long";
pub const REQUIRED_FIELD: &str = "This field is required";
pub const INVALID_EMAIL: &str = "Please enter a valid email address";
pub const INVALID_URL: &str = "Please enter a valid URL";
pub const INVALID_NUMBER: &str = "Please enter a valid number";
pub const INVALID_PHONE: &str = "Please enter a valid phone number";
pub const WEBHOOK_SCHEME: &str = "Webhook URL must use HTTP or HTTPS protocol";
pub const FILE_TYPE_NOT_ALLOWED: &str =
    "File type not allowed. Please upload PDF, DOC, DOCX, TXT, JPG, PNG, or GIF files.";

/// Upload cap for `file` fields when the form sets none.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// MIME types accepted by `file` fields.
pub const ALLOWED_UPLOAD_TYPES: [&str; 8] = [
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "text/plain",
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
];

/// One problem, addressed by a path such as `fields[2].label`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ValidationError::new(field, message));
    }

    /// Field path -> message. A later error for the same path wins.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.errors
            .iter()
            .map(|e| (e.field.clone(), e.message.clone()))
            .collect()
    }

    pub fn messages_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.errors
            .iter()
            .filter(move |e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

fn email_rule() -> &'static Regex {
    static RULE: OnceLock<Regex> = OnceLock::new();
    RULE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"))
}

fn url_rule() -> &'static Regex {
    static RULE: OnceLock<Regex> = OnceLock::new();
    RULE.get_or_init(|| Regex::new(r"^https?://.+").expect("url regex"))
}

fn phone_rule() -> &'static Regex {
    static RULE: OnceLock<Regex> = OnceLock::new();
    RULE.get_or_init(|| Regex::new(r"^\+?[1-9]\d{0,15}$").expect("phone regex"))
}

fn too_long(value: &str, max: usize) -> bool {
    value.chars().count() > max
}

/// Validate a whole builder state before saving.
pub fn validate_form(state: &BuilderState, limits: &FormLimits) -> ValidationResult {
    let mut result = ValidationResult::default();

    if state.title.trim().is_empty() {
        result.push("title", FORM_TITLE_REQUIRED);
    } else if too_long(&state.title, limits.max_title_length) {
        result.push("title", FORM_TITLE_TOO_LONG);
    }

    if too_long(&state.description, limits.max_description_length) {
        result.push("description", FORM_DESCRIPTION_TOO_LONG);
    }

    if state.fields.is_empty() {
        result.push("fields", FIELDS_REQUIRED);
    } else if state.fields.len() > limits.max_fields {
        result.push("fields", TOO_MANY_FIELDS);
    }

    for (index, field) in state.fields.iter().enumerate() {
        result.errors.extend(validate_field(field, index, limits));
    }

    if state.webhook_enabled {
        result
            .errors
            .extend(validate_webhook_url(&state.webhook_url).errors);
    }

    if !result.is_valid() {
        tracing::debug!(
            title = %state.title,
            errors = result.errors.len(),
            "form failed validation"
        );
    }

    result
}

/// Validate one field definition at position `index`.
pub fn validate_field(field: &FormField, index: usize, limits: &FormLimits) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let path = |suffix: &str| format!("fields[{index}].{suffix}");

    if field.label.trim().is_empty() {
        errors.push(ValidationError::new(path("label"), FIELD_LABEL_REQUIRED));
    } else if too_long(&field.label, limits.max_field_label_length) {
        errors.push(ValidationError::new(path("label"), FIELD_LABEL_TOO_LONG));
    }

    if let Some(placeholder) = &field.placeholder {
        if too_long(placeholder, limits.max_field_placeholder_length) {
            errors.push(ValidationError::new(
                path("placeholder"),
                FIELD_PLACEHOLDER_TOO_LONG,
            ));
        }
    }

    if let (true, Some(options)) = (field.field_type.has_options(), &field.options) {
        if options.is_empty() {
            errors.push(ValidationError::new(path("options"), OPTIONS_REQUIRED));
        } else if options.len() > limits.max_options_per_field {
            errors.push(ValidationError::new(path("options"), TOO_MANY_OPTIONS));
        } else {
            for (i, option) in options.iter().enumerate() {
                let option_path = format!("fields[{index}].options[{i}]");
                if option.trim().is_empty() {
                    errors.push(ValidationError::new(option_path, OPTION_EMPTY));
                } else if too_long(option, limits.max_option_length) {
                    errors.push(ValidationError::new(option_path, OPTION_TOO_LONG));
                }
            }
        }
    }

    errors
}

/// Validate a single user-entered value for a field of `field_type`.
pub fn validate_input(value: &str, field_type: FieldType, required: bool) -> ValidationResult {
    let mut result = ValidationResult::default();

    if value.trim().is_empty() {
        if required {
            result.push("input", REQUIRED_FIELD);
        }
        return result;
    }

    match field_type {
        FieldType::Email if !email_rule().is_match(value) => {
            result.push("input", INVALID_EMAIL);
        }
        FieldType::Url if !url_rule().is_match(value) => {
            result.push("input", INVALID_URL);
        }
        FieldType::Number if !value.trim().parse::<f64>().is_ok_and(f64::is_finite) => {
            result.push("input", INVALID_NUMBER);
        }
        FieldType::Phone => {
            let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
            if !phone_rule().is_match(&compact) {
                result.push("input", INVALID_PHONE);
            }
        }
        _ => {}
    }

    result
}

/// Empty is allowed (webhooks are optional); otherwise http(s) only.
pub fn validate_webhook_url(url: &str) -> ValidationResult {
    let mut result = ValidationResult::default();
    if url.trim().is_empty() {
        return result;
    }

    match Url::parse(url.trim()) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
        Ok(parsed) => {
            tracing::debug!(scheme = parsed.scheme(), "webhook url rejected");
            result.push("webhook_url", WEBHOOK_SCHEME);
        }
        Err(err) => {
            tracing::debug!(error = %err, "webhook url does not parse");
            result.push("webhook_url", INVALID_URL);
        }
    }

    result
}

/// Validate submitted data (keyed by field id) against the form's fields.
pub fn validate_submission(fields: &[FormField], data: &Map<String, Value>) -> ValidationResult {
    let mut result = ValidationResult::default();

    for field in fields {
        let outcome = match data.get(&field.id) {
            Some(Value::String(s)) => validate_input(s, field.field_type, field.required),
            Some(Value::Number(n)) => {
                validate_input(&n.to_string(), field.field_type, field.required)
            }
            Some(Value::Array(items)) if !items.is_empty() => continue,
            Some(Value::Bool(true)) | Some(Value::Object(_)) => continue,
            _ => validate_input("", field.field_type, field.required),
        };

        for error in outcome.errors {
            result.push(field.id.clone(), error.message);
        }
    }

    result
}

/// Check an upload for a `file` field. Type is checked before size and only
/// the first problem is reported.
pub fn validate_file_upload(content_type: &str, size: u64, max_size: u64) -> ValidationResult {
    let mut result = ValidationResult::default();

    if !ALLOWED_UPLOAD_TYPES.contains(&content_type) {
        tracing::debug!(content_type, "upload type rejected");
        result.push("file", FILE_TYPE_NOT_ALLOWED);
    } else if size > max_size {
        tracing::debug!(size, max_size, "upload too large");
        result.push(
            "file",
            format!(
                "File size too large. Maximum size is {}.",
                format_file_size(max_size)
            ),
        );
    }

    result
}

/// Human readable size in 1024 steps, at most two decimals: `1.5 KB`, `10 MB`.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field(field_type: FieldType, label: &str) -> FormField {
        FormField {
            id: label.to_lowercase(),
            field_type,
            label: label.to_string(),
            placeholder: None,
            required: false,
            options: None,
            order: 0,
        }
    }

    #[test]
    fn test_empty_form_reports_title_and_fields() {
        let state = BuilderState::new("   ");
        let result = validate_form(&state, &FormLimits::default());
        let map = result.to_map();
        assert_eq!(map["title"], FORM_TITLE_REQUIRED);
        assert_eq!(map["fields"], FIELDS_REQUIRED);
    }

    #[test]
    fn test_limits_are_applied() {
        let limits = FormLimits {
            max_fields: 1,
            max_title_length: 5,
            ..Default::default()
        };
        let mut state = BuilderState::new("Too long title");
        state.fields.push(field(FieldType::Text, "A"));
        state.fields.push(field(FieldType::Text, "B"));

        let map = validate_form(&state, &limits).to_map();
        assert_eq!(map["title"], FORM_TITLE_TOO_LONG);
        assert_eq!(map["fields"], TOO_MANY_FIELDS);
    }

    #[test]
    fn test_field_option_paths() {
        let mut select = field(FieldType::Select, "Pick");
        select.options = Some(vec!["ok".into(), "  ".into(), "x".repeat(51)]);
        let errors = validate_field(&select, 2, &FormLimits::default());
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "fields[2].options[1]");
        assert_eq!(errors[0].message, OPTION_EMPTY);
        assert_eq!(errors[1].field, "fields[2].options[2]");
        assert_eq!(errors[1].message, OPTION_TOO_LONG);

        select.options = Some(vec![]);
        let errors = validate_field(&select, 0, &FormLimits::default());
        assert_eq!(errors[0].message, OPTIONS_REQUIRED);
    }

    #[test]
    fn test_options_ignored_for_plain_fields() {
        let mut text = field(FieldType::Text, "Name");
        text.options = Some(vec![]);
        assert!(validate_field(&text, 0, &FormLimits::default()).is_empty());
    }

    #[test]
    fn test_input_rules() {
        assert!(validate_input("a@b.co", FieldType::Email, true).is_valid());
        assert!(!validate_input("a@b", FieldType::Email, true).is_valid());
        assert!(validate_input("https://x.io", FieldType::Url, false).is_valid());
        assert!(!validate_input("ftp://x.io", FieldType::Url, false).is_valid());
        assert!(validate_input("12.5", FieldType::Number, false).is_valid());
        assert!(!validate_input("twelve", FieldType::Number, false).is_valid());
        for not_finite in ["NaN", "inf", "infinity", "-inf"] {
            assert!(!validate_input(not_finite, FieldType::Number, false).is_valid());
        }
        assert!(validate_input("+44 7700 900123", FieldType::Phone, false).is_valid());
        assert!(!validate_input("0123", FieldType::Phone, false).is_valid());
        assert!(validate_input("", FieldType::Email, false).is_valid());
        assert_eq!(
            validate_input(" ", FieldType::Text, true).errors[0].message,
            REQUIRED_FIELD
        );
    }

    #[test]
    fn test_webhook_url() {
        assert!(validate_webhook_url("").is_valid());
        assert!(validate_webhook_url("https://discord.com/api/webhooks/1/abc").is_valid());
        assert_eq!(
            validate_webhook_url("ftp://example.com").errors[0].message,
            WEBHOOK_SCHEME
        );
        assert_eq!(
            validate_webhook_url("not a url").errors[0].message,
            INVALID_URL
        );
    }

    #[test]
    fn test_webhook_checked_only_when_enabled() {
        let mut state = BuilderState::new("Hooks");
        state.fields.push(field(FieldType::Text, "Name"));
        state.webhook_url = "ftp://example.com".into();
        assert!(validate_form(&state, &FormLimits::default()).is_valid());

        state.webhook_enabled = true;
        let result = validate_form(&state, &FormLimits::default());
        assert_eq!(result.to_map()["webhook_url"], WEBHOOK_SCHEME);
    }

    #[test]
    fn test_submission_keyed_by_field_id() {
        let mut email = field(FieldType::Email, "Email");
        email.required = true;
        let mut skills = field(FieldType::Checkbox, "Skills");
        skills.required = true;
        let age = field(FieldType::Number, "Age");

        let data = json!({ "email": "nope", "skills": [], "age": 31 });
        let result = validate_submission(&[email, skills, age], data.as_object().unwrap());

        assert_eq!(result.messages_for("email").collect::<Vec<_>>(), [INVALID_EMAIL]);
        assert_eq!(result.messages_for("skills").collect::<Vec<_>>(), [REQUIRED_FIELD]);
        assert_eq!(result.messages_for("age").count(), 0);
    }

    #[test]
    fn test_file_upload_rules() {
        assert!(validate_file_upload("application/pdf", 2048, DEFAULT_MAX_UPLOAD_BYTES).is_valid());
        assert!(validate_file_upload("image/png", DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_MAX_UPLOAD_BYTES)
            .is_valid());

        let wrong_type = validate_file_upload("application/zip", 10, DEFAULT_MAX_UPLOAD_BYTES);
        assert_eq!(wrong_type.errors.len(), 1);
        assert_eq!(wrong_type.errors[0].message, FILE_TYPE_NOT_ALLOWED);

        let too_big = validate_file_upload("text/plain", DEFAULT_MAX_UPLOAD_BYTES + 1, DEFAULT_MAX_UPLOAD_BYTES);
        assert_eq!(
            too_big.errors[0].message,
            "File size too large. Maximum size is 10 MB."
        );
        assert_eq!(
            validate_file_upload("image/gif", 3000, 2048).errors[0].message,
            "File size too large. Maximum size is 2 KB."
        );
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(1000), "1000 Bytes");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1_500_000), "1.43 MB");
        assert_eq!(format_file_size(3 * 1024 * 1024 * 1024), "3 GB");
        assert_eq!(format_file_size(5 * 1024 * 1024 * 1024 * 1024), "5120 GB");
    }
}
