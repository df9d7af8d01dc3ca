//! Application form validation
//!
//! Every check runs; the caller gets the full list of problems in field
//! order so the form can show them all at once.

use std::sync::LazyLock;

use regex::Regex;

use super::job_id::is_valid_job_posting_id;
use super::resume::validate_resume;
use crate::models::ApplicationRequest;

pub const MSG_JOB_ID: &str = "Invalid job posting ID";
pub const MSG_NAME: &str = "Name must be at least 2 characters";
pub const MSG_EMAIL: &str = "Valid email address is required";
pub const MSG_LINKEDIN: &str = "LinkedIn URL must be a valid LinkedIn profile";
pub const MSG_GITHUB: &str = "GitHub URL must be a valid GitHub profile";
pub const MSG_PROJECT_NOTE: &str = "Project note must be at least 10 characters";

const MIN_NAME_CHARS: usize = 2;
const MIN_PROJECT_NOTE_CHARS: usize = 10;

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex"));

/// Characters left after trimming surrounding whitespace.
fn trimmed_chars(value: Option<&str>) -> usize {
    value.map_or(0, |v| v.trim().chars().count())
}

/// Optional profile URL: blank passes, anything else must name the site.
fn is_valid_profile(value: Option<&str>, domain: &str) -> bool {
    match value {
        None | Some("") => true,
        Some(url) => url.contains(domain),
    }
}

pub fn is_valid_email(email: Option<&str>) -> bool {
    email.is_some_and(|e| EMAIL_REGEX.is_match(e))
}

/// Validates the candidate fields only, in declaration order.
pub fn validate_fields(req: &ApplicationRequest) -> Vec<String> {
    let mut errors = Vec::new();

    if !is_valid_job_posting_id(req.job_posting_id.as_deref()) {
        errors.push(MSG_JOB_ID.to_string());
    }
    if trimmed_chars(req.name.as_deref()) < MIN_NAME_CHARS {
        errors.push(MSG_NAME.to_string());
    }
    if !is_valid_email(req.email.as_deref()) {
        errors.push(MSG_EMAIL.to_string());
    }
    if !is_valid_profile(req.linkedin.as_deref(), "linkedin.com") {
        errors.push(MSG_LINKEDIN.to_string());
    }
    if !is_valid_profile(req.github.as_deref(), "github.com") {
        errors.push(MSG_GITHUB.to_string());
    }
    if trimmed_chars(req.project_note.as_deref()) < MIN_PROJECT_NOTE_CHARS {
        errors.push(MSG_PROJECT_NOTE.to_string());
    }

    errors
}

/// Validates the whole application: fields first, then the résumé.
/// An empty list means the application may be forwarded.
pub fn validate_application(req: &ApplicationRequest) -> Vec<String> {
    let mut errors = validate_fields(req);
    validate_resume(req.resume.as_ref(), &mut errors);
    errors
}
