//! Error types for the proxy
//!
//! One enum covers every failure a handler can report, and maps each to its
//! HTTP status and JSON body.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::upstream::UpstreamError;

/// Methods both endpoints accept.
pub const ALLOWED_METHODS: [&str; 2] = ["POST", "OPTIONS"];

// == Proxy Error Enum ==
/// Unified error type for the proxy handlers.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// Lookup id missing or not a UUID v4
    #[error("Invalid or missing jobPostingId")]
    InvalidJobPostingId,

    /// One or more application fields failed validation
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// The résumé failed the re-check made while building the upstream form
    #[error("Resume file processing failed: {0}")]
    ResumeProcessing(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    /// The upstream call exceeded its deadline
    #[error("Upstream request timed out")]
    UpstreamTimeout,

    /// The upstream could not be reached
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// The upstream answered but declined the submission
    #[error("Upstream rejected submission (status {status}): {}", .errors.join(", "))]
    UpstreamRejected {
        status: u16,
        errors: Vec<String>,
        code: Option<String>,
        body: String,
    },

    /// Server is missing required configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Anything unclassified
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ProxyError {
    /// HTTP status reported to the caller.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::InvalidJobPostingId
            | ProxyError::Validation(_)
            | ProxyError::ResumeProcessing(_)
            | ProxyError::UpstreamRejected { .. } => StatusCode::BAD_REQUEST,
            ProxyError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ProxyError::UpstreamTimeout => StatusCode::REQUEST_TIMEOUT,
            ProxyError::UpstreamUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ProxyError::Configuration(_) | ProxyError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

// == Upstream Conversion ==
impl From<UpstreamError> for ProxyError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::MissingCredential => {
                ProxyError::Configuration("ASHBY_API_KEY is not set".to_string())
            }
            UpstreamError::Timeout => ProxyError::UpstreamTimeout,
            UpstreamError::Unavailable(e) => ProxyError::UpstreamUnavailable(e.to_string()),
            other => ProxyError::Internal(other.to_string()),
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match self {
            ProxyError::InvalidJobPostingId => json!({
                "success": false,
                "error": "Invalid or missing jobPostingId. Must be a valid UUID."
            }),
            ProxyError::Validation(details) => json!({
                "success": false,
                "error": "Validation failed",
                "details": details
            }),
            ProxyError::ResumeProcessing(reason) => json!({
                "success": false,
                "error": "Resume file processing failed",
                "details": [reason]
            }),
            ProxyError::MethodNotAllowed => {
                let body = Json(json!({
                    "success": false,
                    "error": "Method not allowed",
                    "allowedMethods": ALLOWED_METHODS
                }));
                return (status, [(header::ALLOW, ALLOWED_METHODS.join(", "))], body)
                    .into_response();
            }
            ProxyError::UpstreamTimeout => json!({
                "success": false,
                "error": "Request timeout - please try again"
            }),
            ProxyError::UpstreamUnavailable(_) => json!({
                "success": false,
                "error": "External service unavailable - please try again later"
            }),
            ProxyError::UpstreamRejected {
                status: upstream_status,
                errors,
                code,
                body,
            } => {
                let error = if errors.is_empty() {
                    "Failed to submit application".to_string()
                } else {
                    errors.join(", ")
                };
                json!({
                    "success": false,
                    "error": error,
                    "details": errors,
                    "status": upstream_status,
                    "upstreamCode": code,
                    "upstreamResponse": body
                })
            }
            ProxyError::Configuration(_) => json!({
                "success": false,
                "error": "Server configuration error"
            }),
            ProxyError::Internal(_) => json!({
                "success": false,
                "error": "Internal server error - please try again later"
            }),
        };

        (status, Json(body)).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the proxy handlers.
pub type Result<T> = std::result::Result<T, ProxyError>;
