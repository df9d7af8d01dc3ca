//! API Routes
//!
//! Configures the Axum router with the proxy endpoints.

use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use super::handlers::{
    health_handler, job_lookup_handler, method_not_allowed_handler, preflight_handler,
    stats_handler, submit_application_handler, AppState,
};
use crate::config::Config;

/// How long browsers may cache a pre-flight answer
const CORS_MAX_AGE: Duration = Duration::from_secs(86_400);

/// Settings the router needs beyond the handler state.
#[derive(Debug, Clone)]
pub struct RouterSettings {
    pub allowed_origins: Vec<String>,
    /// Reflect any origin instead of consulting the allow-list
    pub development: bool,
    pub max_body_bytes: usize,
}

impl From<&Config> for RouterSettings {
    fn from(config: &Config) -> Self {
        Self {
            allowed_origins: config.allowed_origins.clone(),
            development: config.development,
            max_body_bytes: config.max_body_bytes,
        }
    }
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

/// Builds the CORS policy.
///
/// Origins outside the allow-list get no `Access-Control-Allow-Origin`
/// header, so the browser blocks the response.
pub fn cors_layer(settings: &RouterSettings) -> CorsLayer {
    let origins = if settings.development {
        AllowOrigin::mirror_request()
    } else {
        let list: Vec<HeaderValue> = settings
            .allowed_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(%origin, "Ignoring unparseable CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(list)
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(CORS_MAX_AGE)
}

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /api/get-job-title` - Resolve a job posting id to display metadata
/// - `POST /api/submit-application` - Forward an application to the ATS
/// - `GET /stats` - Lookup cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: origin allow-list, or any origin in development
/// - Body limit: sized for a base64 résumé
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState, settings: &RouterSettings) -> Router {
    Router::new()
        .route(
            "/api/get-job-title",
            post(job_lookup_handler)
                .options(preflight_handler)
                .fallback(method_not_allowed_handler),
        )
        .route(
            "/api/submit-application",
            post(submit_application_handler)
                .options(preflight_handler)
                .fallback(method_not_allowed_handler),
        )
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(DefaultBodyLimit::max(settings.max_body_bytes))
        .layer(cors_layer(settings))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheStore;
    use crate::upstream::AtsClient;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    fn create_test_app(settings: RouterSettings) -> Router {
        let ats = AtsClient::new("http://127.0.0.1:9", None, "test/1.0").unwrap();
        let state = AppState::new(
            CacheStore::new(100, Duration::from_secs(300)),
            ats,
            Duration::from_secs(1),
            Duration::from_secs(1),
        );
        create_router(state, &settings)
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = create_test_app(RouterSettings::default())
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_get_is_method_not_allowed() {
        let response = create_test_app(RouterSettings::default())
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/get-job-title")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[header::ALLOW], "POST, OPTIONS");
    }

    #[tokio::test]
    async fn test_bare_options_is_ok() {
        let response = create_test_app(RouterSettings::default())
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/api/submit-application")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_preflight_from_allowed_origin() {
        let response = create_test_app(RouterSettings::default())
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/api/get-job-title")
                    .header(header::ORIGIN, "http://localhost:3000")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:3000"
        );
        assert_eq!(response.headers()[header::ACCESS_CONTROL_MAX_AGE], "86400");
    }

    #[tokio::test]
    async fn test_disallowed_origin_gets_no_cors_header() {
        let response = create_test_app(RouterSettings::default())
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/health")
                    .header(header::ORIGIN, "https://evil.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }

    #[tokio::test]
    async fn test_development_reflects_any_origin() {
        let settings = RouterSettings {
            development: true,
            ..RouterSettings::default()
        };
        let response = create_test_app(settings)
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/health")
                    .header(header::ORIGIN, "https://preview.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "https://preview.example"
        );
    }
}
