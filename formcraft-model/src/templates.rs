//! Built-in form templates.
//!
//! Templates are a static catalog. Applying one replaces the builder's fields,
//! title and description; webhook settings are never carried by a template.

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::{BuilderState, FieldType, FormField, ModelError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub icon: String,
    /// Accent color, hex.
    pub color: String,
    pub fields: Vec<FormField>,
}

impl FormTemplate {
    /// Builder state seeded from this template.
    pub fn to_builder_state(&self) -> BuilderState {
        tracing::debug!(template = %self.id, fields = self.fields.len(), "expanding template");
        BuilderState {
            fields: self.fields.clone(),
            title: self.name.clone(),
            description: self.description.clone(),
            webhook_url: String::new(),
            webhook_enabled: false,
        }
    }

    fn contact_form() -> Self {
        Self {
            id: "contact-form".into(),
            name: "Contact Form".into(),
            description: "A simple contact form for collecting inquiries".into(),
            category: "Business".into(),
            icon: "📧".into(),
            color: "#3B82F6".into(),
            fields: vec![
                field("name", FieldType::Text, "Full Name", "Enter your full name", true, &[]),
                field("email", FieldType::Email, "Email Address", "Enter your email address", true, &[]),
                field("phone", FieldType::Text, "Phone Number", "Enter your phone number", false, &[]),
                field(
                    "subject",
                    FieldType::Select,
                    "Subject",
                    "Select a subject",
                    true,
                    &["General Inquiry", "Support", "Sales", "Partnership", "Other"],
                ),
                field("message", FieldType::Textarea, "Message", "Tell us how we can help you...", true, &[]),
            ],
        }
    }

    fn job_application() -> Self {
        Self {
            id: "job-application".into(),
            name: "Job Application".into(),
            description: "Professional job application form".into(),
            category: "Business".into(),
            icon: "💼".into(),
            color: "#10B981".into(),
            fields: vec![
                field("full-name", FieldType::Text, "Full Name", "Enter your full name", true, &[]),
                field("email", FieldType::Email, "Email Address", "Enter your email address", true, &[]),
                field("phone", FieldType::Text, "Phone Number", "Enter your phone number", true, &[]),
                field(
                    "position",
                    FieldType::Text,
                    "Position Applied For",
                    "Enter the position you're applying for",
                    true,
                    &[],
                ),
                field(
                    "experience",
                    FieldType::Select,
                    "Years of Experience",
                    "Select your experience level",
                    true,
                    &["0-1 years", "1-3 years", "3-5 years", "5-10 years", "10+ years"],
                ),
                field(
                    "skills",
                    FieldType::Checkbox,
                    "Skills",
                    "Select your skills",
                    true,
                    &["JavaScript", "React", "Node.js", "Python", "SQL", "AWS", "Docker", "Git"],
                ),
                field(
                    "cover-letter",
                    FieldType::Textarea,
                    "Cover Letter",
                    "Tell us why you're the perfect candidate...",
                    true,
                    &[],
                ),
                field(
                    "available",
                    FieldType::Date,
                    "Available Start Date",
                    "Select your available start date",
                    true,
                    &[],
                ),
            ],
        }
    }

    fn customer_survey() -> Self {
        Self {
            id: "customer-survey".into(),
            name: "Customer Survey".into(),
            description: "Gather customer feedback and satisfaction data".into(),
            category: "Research".into(),
            icon: "📊".into(),
            color: "#8B5CF6".into(),
            fields: vec![
                field(
                    "satisfaction",
                    FieldType::Radio,
                    "How satisfied are you with our service?",
                    "Select your satisfaction level",
                    true,
                    &["Very Dissatisfied", "Dissatisfied", "Neutral", "Satisfied", "Very Satisfied"],
                ),
                field(
                    "recommend",
                    FieldType::Radio,
                    "Would you recommend us to others?",
                    "Select your answer",
                    true,
                    &["Definitely", "Probably", "Not Sure", "Probably Not", "Definitely Not"],
                ),
                field(
                    "features",
                    FieldType::Checkbox,
                    "Which features do you use most?",
                    "Select all that apply",
                    false,
                    &["Feature A", "Feature B", "Feature C", "Feature D", "Feature E"],
                ),
                field(
                    "improvements",
                    FieldType::Textarea,
                    "What could we improve?",
                    "Share your suggestions for improvement...",
                    false,
                    &[],
                ),
                field(
                    "age-group",
                    FieldType::Select,
                    "Age Group",
                    "Select your age group",
                    false,
                    &["18-24", "25-34", "35-44", "45-54", "55-64", "65+"],
                ),
            ],
        }
    }

    fn event_registration() -> Self {
        Self {
            id: "event-registration".into(),
            name: "Event Registration".into(),
            description: "Register attendees for events and conferences".into(),
            category: "Events".into(),
            icon: "🎫".into(),
            color: "#F59E0B".into(),
            fields: vec![
                field("full-name", FieldType::Text, "Full Name", "Enter your full name", true, &[]),
                field("email", FieldType::Email, "Email Address", "Enter your email address", true, &[]),
                field("company", FieldType::Text, "Company/Organization", "Enter your company name", false, &[]),
                field(
                    "ticket-type",
                    FieldType::Radio,
                    "Ticket Type",
                    "Select your ticket type",
                    true,
                    &["General Admission", "VIP", "Student", "Early Bird"],
                ),
                field(
                    "dietary",
                    FieldType::Select,
                    "Dietary Requirements",
                    "Select your dietary requirements",
                    false,
                    &["None", "Vegetarian", "Vegan", "Gluten-Free", "Dairy-Free", "Other"],
                ),
                field(
                    "special-needs",
                    FieldType::Textarea,
                    "Special Requirements",
                    "Any special requirements or accommodations needed?",
                    false,
                    &[],
                ),
            ],
        }
    }

    fn feedback_form() -> Self {
        Self {
            id: "feedback-form".into(),
            name: "Feedback Form".into(),
            description: "Collect general feedback and suggestions".into(),
            category: "Business".into(),
            icon: "💭".into(),
            color: "#EF4444".into(),
            fields: vec![
                field("name", FieldType::Text, "Name (Optional)", "Enter your name", false, &[]),
                field("email", FieldType::Email, "Email (Optional)", "Enter your email for follow-up", false, &[]),
                field(
                    "feedback-type",
                    FieldType::Select,
                    "Type of Feedback",
                    "Select the type of feedback",
                    true,
                    &["Bug Report", "Feature Request", "General Feedback", "Complaint", "Compliment"],
                ),
                field(
                    "rating",
                    FieldType::Radio,
                    "Overall Rating",
                    "Rate your experience",
                    true,
                    &["1 - Poor", "2 - Fair", "3 - Good", "4 - Very Good", "5 - Excellent"],
                ),
                field(
                    "feedback",
                    FieldType::Textarea,
                    "Your Feedback",
                    "Please share your detailed feedback...",
                    true,
                    &[],
                ),
            ],
        }
    }
}

// `order` is filled in by `numbered`.
fn field(
    id: &str,
    field_type: FieldType,
    label: &str,
    placeholder: &str,
    required: bool,
    options: &[&str],
) -> FormField {
    FormField {
        id: id.to_string(),
        field_type,
        label: label.to_string(),
        placeholder: Some(placeholder.to_string()),
        required,
        options: (!options.is_empty()).then(|| options.iter().map(|o| o.to_string()).collect()),
        order: 0,
    }
}

fn numbered(mut template: FormTemplate) -> FormTemplate {
    for (i, f) in template.fields.iter_mut().enumerate() {
        f.order = i as u32;
    }
    template
}

/// The full catalog, in display order.
pub fn catalog() -> &'static [FormTemplate] {
    static CATALOG: OnceLock<Vec<FormTemplate>> = OnceLock::new();
    CATALOG.get_or_init(|| {
        vec![
            FormTemplate::contact_form(),
            FormTemplate::job_application(),
            FormTemplate::customer_survey(),
            FormTemplate::event_registration(),
            FormTemplate::feedback_form(),
        ]
        .into_iter()
        .map(numbered)
        .collect()
    })
}

pub fn by_id(id: &str) -> Result<&'static FormTemplate, ModelError> {
    catalog()
        .iter()
        .find(|t| t.id == id)
        .ok_or_else(|| ModelError::UnknownTemplate { id: id.to_string() })
}

pub fn by_category(category: &str) -> Vec<&'static FormTemplate> {
    catalog().iter().filter(|t| t.category == category).collect()
}

/// Distinct categories in first-seen order.
pub fn categories() -> Vec<&'static str> {
    let mut seen: Vec<&'static str> = Vec::new();
    for template in catalog() {
        if !seen.contains(&template.category.as_str()) {
            seen.push(template.category.as_str());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_form;
    use crate::FormLimits;

    #[test]
    fn test_catalog_lookup() {
        assert_eq!(catalog().len(), 5);
        assert_eq!(by_id("customer-survey").unwrap().name, "Customer Survey");
        assert!(matches!(
            by_id("tax-return"),
            Err(ModelError::UnknownTemplate { .. })
        ));
    }

    #[test]
    fn test_categories_in_catalog_order() {
        assert_eq!(categories(), vec!["Business", "Research", "Events"]);
        let business: Vec<_> = by_category("Business").iter().map(|t| t.id.as_str()).collect();
        assert_eq!(business, vec!["contact-form", "job-application", "feedback-form"]);
    }

    #[test]
    fn test_fields_are_numbered() {
        for template in catalog() {
            for (i, f) in template.fields.iter().enumerate() {
                assert_eq!(f.order, i as u32, "{} field {}", template.id, f.id);
            }
        }
    }

    #[test]
    fn test_every_template_validates() {
        for template in catalog() {
            let state = template.to_builder_state();
            assert!(!state.webhook_enabled);
            let result = validate_form(&state, &FormLimits::default());
            assert!(result.is_valid(), "{}: {:?}", template.id, result.errors);
        }
    }
}
