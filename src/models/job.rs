//! Job posting display metadata
//!
//! The normalized shape stored in the lookup cache and returned to the front end.

use serde::{Deserialize, Serialize};

/// Shown when the ATS leaves the posting title empty.
pub const PLACEHOLDER_TITLE: &str = "Position Title";
/// Shown when the ATS leaves the department empty.
pub const PLACEHOLDER_DEPARTMENT: &str = "Department";
/// Shown when the ATS leaves the location empty.
pub const PLACEHOLDER_LOCATION: &str = "Location";

/// Normalized job posting metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobDetails {
    pub title: String,
    pub department: String,
    pub location: String,
}

/// The `results` object of the ATS `jobPosting.info` response. Only the
/// fields the front end displays are read.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPostingInfo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub department_name: Option<String>,
    #[serde(default)]
    pub location_name: Option<String>,
}

impl From<JobPostingInfo> for JobDetails {
    fn from(info: JobPostingInfo) -> Self {
        Self {
            title: or_placeholder(info.title, PLACEHOLDER_TITLE),
            department: or_placeholder(info.department_name, PLACEHOLDER_DEPARTMENT),
            location: or_placeholder(info.location_name, PLACEHOLDER_LOCATION),
        }
    }
}

fn or_placeholder(value: Option<String>, placeholder: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| placeholder.to_string())
}
