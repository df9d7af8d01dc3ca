//! ATS HTTP client
//!
//! Thin wrapper around `reqwest` for the two Ashby endpoints the proxy uses.
//! Every call takes its deadline from the caller and is never retried.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use super::{with_deadline, ApplicationForm, SubmissionReply, UpstreamError};
use crate::models::JobPostingInfo;

const JOB_POSTING_INFO_PATH: &str = "/jobPosting.info";
const APPLICATION_SUBMIT_PATH: &str = "/applicationForm.submit";

#[derive(Debug, Deserialize)]
struct JobPostingEnvelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    results: Option<JobPostingInfo>,
}

/// Client for the applicant tracking system API.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct AtsClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl std::fmt::Debug for AtsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AtsClient")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl AtsClient {
    /// Creates a client. A missing key is not an error here; each call
    /// reports it so the server can still start and answer health checks.
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        user_agent: &str,
    ) -> Result<Self, UpstreamError> {
        let http = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| UpstreamError::Request(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.is_empty()),
        })
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    fn credential(&self) -> Result<&str, UpstreamError> {
        self.api_key
            .as_deref()
            .ok_or(UpstreamError::MissingCredential)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // == Job Posting Info ==
    /// Fetches a job posting.
    ///
    /// Fails unless the status is 2xx and the body carries `success: true`
    /// with a `results` object.
    pub async fn fetch_job_posting(
        &self,
        job_posting_id: &str,
        deadline: Duration,
    ) -> Result<JobPostingInfo, UpstreamError> {
        let api_key = self.credential()?;

        with_deadline(deadline, async {
            let response = self
                .http
                .post(self.url(JOB_POSTING_INFO_PATH))
                .basic_auth(api_key, None::<&str>)
                .json(&json!({ "jobPostingId": job_posting_id }))
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                warn!(%job_posting_id, status = status.as_u16(), %body, "ATS job lookup failed");
                return Err(UpstreamError::Status {
                    status: status.as_u16(),
                    body,
                });
            }

            let body = response.text().await?;
            let envelope: JobPostingEnvelope = serde_json::from_str(&body)
                .map_err(|e| UpstreamError::InvalidResponse(e.to_string()))?;

            match envelope {
                JobPostingEnvelope {
                    success: true,
                    results: Some(info),
                } => Ok(info),
                _ => {
                    warn!(%job_posting_id, %body, "ATS job lookup returned an unexpected body");
                    Err(UpstreamError::InvalidResponse(
                        "missing success or results".to_string(),
                    ))
                }
            }
        })
        .await
    }

    // == Application Submit ==
    /// Sends an application and returns the raw reply for interpretation.
    pub async fn submit_application(
        &self,
        form: ApplicationForm,
        deadline: Duration,
    ) -> Result<SubmissionReply, UpstreamError> {
        let api_key = self.credential()?;
        let multipart = form.into_multipart()?;

        with_deadline(deadline, async {
            let response = self
                .http
                .post(self.url(APPLICATION_SUBMIT_PATH))
                .basic_auth(api_key, None::<&str>)
                .multipart(multipart)
                .send()
                .await?;

            let status = response.status().as_u16();
            let body = response.text().await?;
            debug!(status, %body, "ATS submission reply");

            Ok::<_, UpstreamError>(SubmissionReply { status, body })
        })
        .await
    }
}
