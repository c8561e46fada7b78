//! Export of form submissions as CSV or JSON.
//!
//! CSV columns are: submission id, submitted-at, status, one column per form
//! field (headed by its label), then optionally reviewed-at and review notes.
//! Both formats honour the optional submitted-at window in `ExportOptions`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{FormField, Submission};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportOptions {
    /// Append "Reviewed At" and "Review Notes" columns.
    #[serde(default)]
    pub include_metadata: bool,
    /// Skip submissions received before this instant.
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    /// Skip submissions received after this instant.
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
}

impl ExportOptions {
    /// Whether `submission` falls inside the inclusive `start..=end` window.
    pub fn includes(&self, submission: &Submission) -> bool {
        let at = submission.submitted_at;
        self.start.map_or(true, |start| at >= start) && self.end.map_or(true, |end| at <= end)
    }
}

/// Submissions inside the options' date window, in input order.
pub fn filter_submissions<'a>(
    submissions: &'a [Submission],
    options: &ExportOptions,
) -> Vec<&'a Submission> {
    submissions.iter().filter(|s| options.includes(s)).collect()
}

/// Render submissions as CSV text. Rows are separated by `\n`.
pub fn export_csv(submissions: &[Submission], fields: &[FormField], options: &ExportOptions) -> String {
    let mut headers: Vec<String> = vec![
        "Submission ID".into(),
        "Submitted At".into(),
        "Status".into(),
    ];
    headers.extend(fields.iter().map(|f| f.label.clone()));
    if options.include_metadata {
        headers.push("Reviewed At".into());
        headers.push("Review Notes".into());
    }

    let selected = filter_submissions(submissions, options);
    let mut lines = Vec::with_capacity(selected.len() + 1);
    lines.push(csv_row(&headers));

    for submission in &selected {
        let mut row = vec![
            submission.id.to_string(),
            timestamp(&submission.submitted_at),
            submission.status.as_str().to_string(),
        ];
        row.extend(
            fields
                .iter()
                .map(|f| cell_text(submission.data.get(&f.label))),
        );
        if options.include_metadata {
            row.push(submission.reviewed_at.as_ref().map(timestamp).unwrap_or_default());
            row.push(submission.review_notes.clone().unwrap_or_default());
        }
        lines.push(csv_row(&row));
    }

    tracing::debug!(
        rows = selected.len(),
        skipped = submissions.len() - selected.len(),
        columns = headers.len(),
        "exported submissions to csv"
    );

    lines.join("\n")
}

/// Pretty-printed JSON array of the submissions inside the date window.
pub fn export_json(submissions: &[Submission], options: &ExportOptions) -> serde_json::Result<String> {
    let selected = filter_submissions(submissions, options);
    let json = serde_json::to_string_pretty(&selected)?;
    tracing::debug!(rows = selected.len(), "exported submissions to json");
    Ok(json)
}

/// `<slug>-submissions-<yyyy-mm-dd>.<csv|json>`
pub fn export_filename(form_title: &str, format: ExportFormat, now: DateTime<Utc>) -> String {
    let mut slug = String::with_capacity(form_title.len());
    for c in form_title.trim().chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    let slug = if slug.is_empty() { "form" } else { slug };

    format!(
        "{}-submissions-{}.{}",
        slug,
        now.format("%Y-%m-%d"),
        format.extension()
    )
}

fn timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Falsy values (null, false, 0, "") export as empty cells.
fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => String::new(),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", "),
        Some(other) => other.to_string(),
    }
}

fn csv_row(cells: &[String]) -> String {
    cells
        .iter()
        .map(|c| escape_cell(c))
        .collect::<Vec<_>>()
        .join(",")
}

fn escape_cell(cell: &str) -> String {
    if cell.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}
