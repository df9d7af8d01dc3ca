//! Request and Response models for the proxy API
//!
//! DTOs for the HTTP bodies exchanged with the front end, plus the
//! normalized job metadata kept in the lookup cache.

pub mod job;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use job::{JobDetails, JobPostingInfo};
pub use requests::{ApplicationRequest, JobLookupRequest, ResumeUpload};
pub use responses::{HealthResponse, JobLookupResponse, StatsResponse, SubmitResponse};
