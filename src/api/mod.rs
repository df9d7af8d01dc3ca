//! API Module
//!
//! HTTP handlers and routing for the proxy.
//!
//! # Endpoints
//! - `POST /api/get-job-title` - Job posting display metadata
//! - `POST /api/submit-application` - Forward an application to the ATS
//! - `GET /stats` - Lookup cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::{cors_layer, create_router, RouterSettings};
