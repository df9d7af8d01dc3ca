//! API Handlers
//!
//! HTTP request handlers for the job lookup and application endpoints.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use crate::cache::{CacheStore, SharedJobCache};
use crate::config::Config;
use crate::error::{ProxyError, Result};
use crate::models::{
    ApplicationRequest, HealthResponse, JobDetails, JobLookupRequest, JobLookupResponse,
    StatsResponse, SubmitResponse,
};
use crate::upstream::{interpret_submission, ApplicationForm, AtsClient, UpstreamError};
use crate::validation::{is_valid_job_posting_id, validate_application};

/// Application state shared across all handlers.
///
/// The lookup cache is the only shared mutable state; the lock is never
/// held across an upstream call.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe lookup cache
    pub cache: SharedJobCache,
    pub ats: AtsClient,
    pub lookup_timeout: Duration,
    pub submit_timeout: Duration,
}

impl AppState {
    pub fn new(
        cache: CacheStore<JobDetails>,
        ats: AtsClient,
        lookup_timeout: Duration,
        submit_timeout: Duration,
    ) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
            ats,
            lookup_timeout,
            submit_timeout,
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> std::result::Result<Self, UpstreamError> {
        let cache = CacheStore::new(config.cache_max_entries, config.cache_ttl());
        let ats = AtsClient::new(
            config.ats_base_url.clone(),
            config.ats_api_key.clone(),
            &config.user_agent,
        )?;

        Ok(Self::new(
            cache,
            ats,
            config.lookup_timeout(),
            config.submit_timeout(),
        ))
    }
}

/// Handler for POST /api/get-job-title
///
/// Serves from the cache when possible; otherwise asks the ATS and caches
/// the normalized answer.
pub async fn job_lookup_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<JobLookupRequest>, JsonRejection>,
) -> Result<Json<JobLookupResponse>> {
    let Json(req) = payload.map_err(|rejection| {
        warn!(%rejection, "Unreadable job lookup body");
        ProxyError::InvalidJobPostingId
    })?;

    let job_posting_id = match req.job_posting_id {
        Some(id) if is_valid_job_posting_id(Some(&id)) => id,
        other => {
            warn!(job_posting_id = ?other, "Rejected job lookup with invalid id");
            return Err(ProxyError::InvalidJobPostingId);
        }
    };

    // Write lock: reads update the hit/miss counters
    let cached = state.cache.write().await.get(&job_posting_id);
    if let Some(job) = cached {
        debug!(%job_posting_id, "Job lookup served from cache");
        return Ok(Json(JobLookupResponse::cached(job)));
    }

    let info = state
        .ats
        .fetch_job_posting(&job_posting_id, state.lookup_timeout)
        .await
        .map_err(|e| {
            error!(%job_posting_id, error = %e, "Job lookup failed");
            ProxyError::from(e)
        })?;

    let job = JobDetails::from(info);
    state
        .cache
        .write()
        .await
        .put(job_posting_id.clone(), job.clone());
    info!(%job_posting_id, title = %job.title, "Job lookup resolved upstream");

    Ok(Json(JobLookupResponse::fresh(job)))
}

/// Handler for POST /api/submit-application
///
/// Validates everything up front, rebuilds the résumé from the payload and
/// forwards the application to the ATS.
pub async fn submit_application_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ApplicationRequest>, JsonRejection>,
) -> Result<Json<SubmitResponse>> {
    let Json(req) = payload.map_err(|rejection| {
        warn!(%rejection, "Unreadable application body");
        ProxyError::Validation(vec![rejection.body_text()])
    })?;

    let job_posting_id = req.job_posting_id.clone().unwrap_or_default();

    let errors = validate_application(&req);
    if !errors.is_empty() {
        warn!(%job_posting_id, ?errors, "Application failed validation");
        return Err(ProxyError::Validation(errors));
    }

    info!(
        %job_posting_id,
        name = %req.redacted_name(),
        email = %req.redacted_email(),
        has_linkedin = req.linkedin.as_deref().is_some_and(|l| !l.is_empty()),
        has_github = req.has_github(),
        project_note_chars = req.project_note.as_deref().map_or(0, |n| n.chars().count()),
        "Received application"
    );

    let form = ApplicationForm::from_request(&req).map_err(|e| {
        error!(%job_posting_id, error = %e, "Resume re-check failed");
        e
    })?;
    if let Some(resume) = &form.resume {
        info!(
            %job_posting_id,
            file_name = %resume.file_name,
            mime_type = %resume.mime_type,
            size = resume.bytes.len(),
            "Resume attached"
        );
    }
    debug!(%job_posting_id, paths = ?form.paths(), "Submitting application to ATS");

    let reply = state
        .ats
        .submit_application(form, state.submit_timeout)
        .await
        .map_err(|e| {
            error!(%job_posting_id, error = %e, "Application submission failed");
            ProxyError::from(e)
        })?;

    let status = reply.status;
    interpret_submission(reply).map_err(|e| {
        error!(%job_posting_id, status, error = %e, "ATS rejected application");
        e
    })?;

    info!(%job_posting_id, "Application submitted");
    Ok(Json(SubmitResponse::submitted()))
}

/// Answers a bare OPTIONS request. CORS pre-flights are answered by the
/// CORS layer before they get here.
pub async fn preflight_handler() -> StatusCode {
    StatusCode::OK
}

/// Fallback for any method other than POST or OPTIONS.
pub async fn method_not_allowed_handler() -> ProxyError {
    ProxyError::MethodNotAllowed
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.cache.read().await;
    Json(StatsResponse::new(&cache.stats(), cache.capacity()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
