use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use super::choices::{DesiredPosition, DesiredYear, Faculty, Gender, Interest};
use super::draft::Draft;

/// The normalized payload derived from a validated [`Draft`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    pub full_name: String,
    pub gender: Gender,
    pub faculty: String,
    pub desired_position: DesiredPosition,
    pub desired_year: DesiredYear,
    pub age: String,
    pub email: String,
    pub interests: Vec<Interest>,
    pub comments: String,
}

/// A [`SubmissionRecord`] with the submission time attached; this is the wire body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StampedSubmission {
    #[serde(flatten)]
    pub record: SubmissionRecord,
    /// ISO-8601 UTC with millisecond precision, e.g. `2026-10-19T09:30:00.000Z`.
    pub timestamp: String,
}

impl SubmissionRecord {
    /// Builds a record from a draft.
    ///
    /// Returns `None` if a select the record needs is unset; callers validate
    /// first, so this only happens on an invalid draft.
    pub fn from_draft(draft: &Draft) -> Option<Self> {
        let faculty = match draft.faculty {
            Some(Faculty::Other) | None => draft.faculty_other.trim().to_string(),
            Some(f) => f.wire_str().to_string(),
        };
        Some(Self {
            full_name: format!("{} {}", draft.first_name.trim(), draft.last_name.trim()),
            gender: draft.gender?,
            faculty,
            desired_position: draft.desired_position?,
            desired_year: draft.desired_year?,
            age: draft.age.clone(),
            email: draft.email.trim().to_string(),
            interests: draft.interests.clone(),
            comments: draft.comments.clone(),
        })
    }

    /// Attaches a submission timestamp.
    pub fn stamp(self, at: DateTime<Utc>) -> StampedSubmission {
        StampedSubmission {
            record: self,
            timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}
