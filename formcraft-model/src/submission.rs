//! Submissions collected by a published form, and their review lifecycle.
//!
//! A submission starts `Pending` and is reviewed exactly once, ending up
//! `Approved` or `Denied` with optional reviewer notes.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use uuid::Uuid;

/// Window counted as "recent" in submission stats.
pub const RECENT_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    #[default]
    Pending,
    Approved,
    Denied,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Pending => "pending",
            SubmissionStatus::Approved => "approved",
            SubmissionStatus::Denied => "denied",
        }
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One response to a form. `data` is keyed by field label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: Uuid,
    pub form_id: Uuid,
    pub data: Map<String, Value>,
    pub submitted_at: DateTime<Utc>,
    #[serde(default)]
    pub status: SubmissionStatus,
    #[serde(default)]
    pub reviewed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub review_notes: Option<String>,
}

impl Submission {
    pub fn new(form_id: Uuid, data: Map<String, Value>) -> Self {
        Self::received_at(form_id, data, Utc::now())
    }

    pub fn received_at(form_id: Uuid, data: Map<String, Value>, at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            form_id,
            data,
            submitted_at: at,
            status: SubmissionStatus::Pending,
            reviewed_at: None,
            review_notes: None,
        }
    }

    pub fn approve(&mut self, notes: Option<String>) -> Result<(), SubmissionError> {
        self.review(SubmissionStatus::Approved, notes, Utc::now())
    }

    pub fn deny(&mut self, notes: Option<String>) -> Result<(), SubmissionError> {
        self.review(SubmissionStatus::Denied, notes, Utc::now())
    }

    /// Record a review decision. Only pending submissions can be reviewed.
    pub fn review(
        &mut self,
        decision: SubmissionStatus,
        notes: Option<String>,
        at: DateTime<Utc>,
    ) -> Result<(), SubmissionError> {
        if decision == SubmissionStatus::Pending {
            return Err(SubmissionError::InvalidDecision);
        }
        if self.status != SubmissionStatus::Pending {
            tracing::warn!(
                submission_id = %self.id,
                status = self.status.as_str(),
                "submission already reviewed"
            );
            return Err(SubmissionError::AlreadyReviewed {
                submission_id: self.id,
                status: self.status,
            });
        }

        self.status = decision;
        self.reviewed_at = Some(at);
        self.review_notes = notes.filter(|n| !n.trim().is_empty());

        tracing::info!(
            submission_id = %self.id,
            status = decision.as_str(),
            "submission reviewed"
        );
        Ok(())
    }

    /// Time between submission and review, if reviewed.
    pub fn response_time(&self) -> Option<Duration> {
        self.reviewed_at.map(|r| r - self.submitted_at)
    }
}

/// Aggregate counts shown on the submissions dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionStats {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub denied: usize,
    /// Submitted within the last `RECENT_WINDOW_DAYS` before `now`.
    pub recent: usize,
    /// Mean review latency in milliseconds over reviewed submissions.
    pub average_response_time_ms: Option<i64>,
}

impl SubmissionStats {
    pub fn from_submissions(submissions: &[Submission], now: DateTime<Utc>) -> Self {
        let cutoff = now - Duration::days(RECENT_WINDOW_DAYS);
        let mut stats = Self {
            total: submissions.len(),
            ..Self::default()
        };

        let mut reviewed = 0i32;
        let mut total_response = Duration::zero();

        for s in submissions {
            match s.status {
                SubmissionStatus::Pending => stats.pending += 1,
                SubmissionStatus::Approved => stats.approved += 1,
                SubmissionStatus::Denied => stats.denied += 1,
            }
            if s.submitted_at > cutoff {
                stats.recent += 1;
            }
            if let Some(rt) = s.response_time() {
                reviewed += 1;
                total_response = total_response + rt;
            }
        }

        if reviewed > 0 {
            stats.average_response_time_ms = Some((total_response / reviewed).num_milliseconds());
        }

        stats
    }
}

/// Submission-level errors.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("submission {submission_id} was already reviewed ({status})")]
    AlreadyReviewed {
        submission_id: Uuid,
        status: SubmissionStatus,
    },

    #[error("a review decision must be approve or deny")]
    InvalidDecision,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, day, hour, 0, 0).unwrap()
    }

    fn submission(day: u32) -> Submission {
        let data = json!({ "Full Name": "Ada" }).as_object().unwrap().clone();
        Submission::received_at(Uuid::new_v4(), data, at(day, 9))
    }

    #[test]
    fn test_review_only_once() {
        let mut s = submission(1);
        s.review(SubmissionStatus::Approved, Some("looks good".into()), at(1, 12))
            .unwrap();
        assert_eq!(s.status, SubmissionStatus::Approved);
        assert_eq!(s.review_notes.as_deref(), Some("looks good"));
        assert_eq!(s.response_time(), Some(Duration::hours(3)));

        let err = s.deny(None).unwrap_err();
        assert!(matches!(err, SubmissionError::AlreadyReviewed { .. }));
        assert_eq!(s.status, SubmissionStatus::Approved);
    }

    #[test]
    fn test_blank_notes_dropped_and_pending_decision_rejected() {
        let mut s = submission(1);
        assert!(matches!(
            s.review(SubmissionStatus::Pending, None, at(1, 10)),
            Err(SubmissionError::InvalidDecision)
        ));
        s.review(SubmissionStatus::Denied, Some("  ".into()), at(1, 10))
            .unwrap();
        assert_eq!(s.review_notes, None);
    }

    #[test]
    fn test_stats() {
        let mut a = submission(1);
        a.review(SubmissionStatus::Approved, None, at(1, 11)).unwrap();
        let mut b = submission(9);
        b.review(SubmissionStatus::Denied, None, at(9, 13)).unwrap();
        let c = submission(10);

        let stats = SubmissionStats::from_submissions(&[a, b, c], at(12, 0));
        assert_eq!(stats.total, 3);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.approved, 1);
        assert_eq!(stats.denied, 1);
        assert_eq!(stats.recent, 2);
        assert_eq!(stats.average_response_time_ms, Some(3 * 60 * 60 * 1000));
    }

    #[test]
    fn test_stats_without_reviews() {
        let stats = SubmissionStats::from_submissions(&[submission(3)], at(3, 12));
        assert_eq!(stats.average_response_time_ms, None);
        assert_eq!(SubmissionStats::from_submissions(&[], at(3, 12)).total, 0);
    }
}
