//! Validation Module
//!
//! Rejects malformed input before any upstream call is made.

mod application;
mod job_id;
pub mod resume;

pub use application::{is_valid_email, validate_application, validate_fields};
pub use job_id::is_valid_job_posting_id;
pub use resume::{check_resume_encoding, decode_resume, validate_resume, ResumeDecodeError, MAX_RESUME_BYTES};
