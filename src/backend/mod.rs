//! Submission client: delivers a [`SubmissionRecord`] to the remote backend.
//!
//! The backend stores the record in a spreadsheet and emails the applicant;
//! this side only learns whether it succeeded.

mod client;
mod error;
mod reply;

use std::future::Future;

pub use client::HttpBackend;
pub use error::BackendError;
pub use reply::BackendReply;

use crate::model::SubmissionRecord;

/// Something that accepts a submission and reports success as a boolean.
pub trait Backend: Send + Sync {
    /// Sends `record`, returning `true` only if the backend confirmed it.
    fn submit(&self, record: SubmissionRecord) -> impl Future<Output = bool> + Send;
}
