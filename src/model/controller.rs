//! Form state controller: owns the draft, its errors and the submit workflow.

use tracing::{debug, info};

use super::choices::Interest;
use super::draft::{Draft, FieldKey, FieldUpdate};
use super::record::SubmissionRecord;
use super::validation::{ErrorMap, validate};
use crate::backend::Backend;

/// What the caller shows once a submission settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub full_name: String,
    pub email: String,
    /// Whether the backend confirmed the submission.
    pub delivered: bool,
}

/// Result of [`FormController::begin_submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitStart {
    /// A submission is already in flight; nothing was done.
    Busy,
    /// Validation failed; errors are stored on the controller.
    Invalid,
    /// The controller is now busy and `record` must be sent.
    Ready(SubmissionRecord),
}

/// Result of [`FormController::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Busy,
    Invalid,
    Completed(Receipt),
}

/// Contact details of the submission in flight.
#[derive(Debug, Clone)]
struct InFlight {
    full_name: String,
    email: String,
}

/// Holds the mutable [`Draft`] and its [`ErrorMap`].
#[derive(Debug, Clone, Default)]
pub struct FormController {
    draft: Draft,
    errors: ErrorMap,
    in_flight: Option<InFlight>,
}

impl FormController {
    /// Creates a controller with an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    /// Returns `true` between [`begin_submit`](Self::begin_submit) and
    /// [`finish_submit`](Self::finish_submit).
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Overwrites one field and drops that field's error, if any.
    ///
    /// Other errors are left alone until the next submit.
    pub fn set_field(&mut self, update: FieldUpdate) {
        if self.is_busy() {
            return;
        }
        let key = update.key();
        self.draft.apply(update);
        self.errors.remove(key);
    }

    /// Adds `interest` if absent, removes it if present.
    pub fn toggle_interest(&mut self, interest: Interest) {
        if self.is_busy() {
            return;
        }
        if let Some(i) = self.draft.interests.iter().position(|x| *x == interest) {
            self.draft.interests.remove(i);
        } else {
            self.draft.interests.push(interest);
        }
        self.errors.remove(FieldKey::Interests);
    }

    pub fn set_privacy_consent(&mut self, consent: bool) {
        if self.is_busy() {
            return;
        }
        self.draft.privacy_consent = consent;
        self.errors.remove(FieldKey::PrivacyConsent);
    }

    /// Validates the draft and, if it passes, marks the controller busy.
    pub fn begin_submit(&mut self) -> SubmitStart {
        if self.is_busy() {
            debug!("submit ignored while a submission is in flight");
            return SubmitStart::Busy;
        }

        self.errors = validate(&self.draft);
        if !self.errors.is_empty() {
            debug!(errors = self.errors.len(), "submit blocked by validation");
            return SubmitStart::Invalid;
        }

        let Some(record) = SubmissionRecord::from_draft(&self.draft) else {
            return SubmitStart::Invalid;
        };
        self.in_flight = Some(InFlight {
            full_name: record.full_name.clone(),
            email: record.email.clone(),
        });
        info!("submission started");
        SubmitStart::Ready(record)
    }

    /// Clears the busy state and discards the draft.
    ///
    /// Returns `None` if no submission was in flight.
    pub fn finish_submit(&mut self, delivered: bool) -> Option<Receipt> {
        let in_flight = self.in_flight.take()?;
        self.draft = Draft::new();
        self.errors.clear();
        info!(delivered, "submission finished");
        Some(Receipt {
            full_name: in_flight.full_name,
            email: in_flight.email,
            delivered,
        })
    }

    /// Validates, sends through `backend` and settles, in one call.
    pub async fn submit<B: Backend>(&mut self, backend: &B) -> SubmitOutcome {
        let record = match self.begin_submit() {
            SubmitStart::Busy => return SubmitOutcome::Busy,
            SubmitStart::Invalid => return SubmitOutcome::Invalid,
            SubmitStart::Ready(record) => record,
        };
        let delivered = backend.submit(record).await;
        match self.finish_submit(delivered) {
            Some(receipt) => SubmitOutcome::Completed(receipt),
            None => SubmitOutcome::Busy,
        }
    }
}
