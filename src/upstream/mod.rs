//! Upstream Module
//!
//! Everything that talks to the applicant tracking system: the HTTP client,
//! the deadline primitive every call goes through, the multi-part form
//! builder and the interpretation of upstream replies.

mod client;
mod deadline;
pub mod form;
mod submission;

use thiserror::Error;

pub use client::AtsClient;
pub use deadline::with_deadline;
pub use form::{ApplicationForm, FieldSubmission, ResumeAttachment};
pub use submission::{interpret_submission, SubmissionReply};

/// Ashby production API
pub const DEFAULT_BASE_URL: &str = "https://api.ashbyhq.com";

// == Upstream Error ==
/// Failures of a single upstream exchange.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// No API key configured
    #[error("ATS API key is not configured")]
    MissingCredential,

    /// The call did not finish before its deadline
    #[error("upstream call exceeded its deadline")]
    Timeout,

    /// Connection-level failure
    #[error("upstream unreachable: {0}")]
    Unavailable(#[source] reqwest::Error),

    /// Non-success HTTP status
    #[error("upstream returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Success status, but the body is not what the endpoint documents
    #[error("invalid upstream response: {0}")]
    InvalidResponse(String),

    /// The request could not be assembled
    #[error("could not build upstream request: {0}")]
    Request(String),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            UpstreamError::Timeout
        } else if err.is_decode() {
            UpstreamError::InvalidResponse(err.to_string())
        } else if err.is_builder() {
            UpstreamError::Request(err.to_string())
        } else {
            UpstreamError::Unavailable(err)
        }
    }
}
