//! Request DTOs for the proxy API
//!
//! Incoming bodies are untrusted. Every field is optional and a field of the
//! wrong JSON type is read as absent, so the validator can report it
//! alongside every other problem instead of failing the whole body.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Reads a field as `T`, treating a mismatched type as missing.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// Request body for `POST /api/get-job-title`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobLookupRequest {
    #[serde(default, deserialize_with = "lenient")]
    pub job_posting_id: Option<String>,
}

/// Résumé attachment as sent by the browser.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResumeUpload {
    /// Base64 file content
    #[serde(default, deserialize_with = "lenient")]
    pub data: Option<String>,
    /// Original filename
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    /// Declared MIME type
    #[serde(default, rename = "type", deserialize_with = "lenient")]
    pub mime_type: Option<String>,
}

/// Request body for `POST /api/submit-application`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRequest {
    #[serde(default, deserialize_with = "lenient")]
    pub job_posting_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub linkedin: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub github: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub project_note: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub resume: Option<ResumeUpload>,
}

impl ApplicationRequest {
    /// Name shortened for logs.
    pub fn redacted_name(&self) -> String {
        let name = self.name.as_deref().unwrap_or_default();
        let mut short: String = name.chars().take(20).collect();
        if name.chars().count() > 20 {
            short.push_str("...");
        }
        short
    }

    /// Email with the local part masked for logs, e.g. `ja***@example.com`.
    pub fn redacted_email(&self) -> String {
        let email = self.email.as_deref().unwrap_or_default();
        match email.rsplit_once('@') {
            Some((local, domain)) => {
                let visible: String = local.chars().take(2).collect();
                format!("{visible}***@{domain}")
            }
            None => "***".to_string(),
        }
    }

    /// Whether a non-blank GitHub profile was supplied.
    pub fn has_github(&self) -> bool {
        self.github.as_deref().is_some_and(|g| !g.trim().is_empty())
    }
}
