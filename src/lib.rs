//! ATS Proxy - job application front end to applicant tracking system
//!
//! Resolves job postings to display metadata through a bounded TTL cache and
//! forwards validated applications, résumé included, to the ATS.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;
pub mod upstream;
pub mod validation;

pub use api::{create_router, AppState, RouterSettings};
pub use config::Config;
pub use error::ProxyError;
pub use tasks::spawn_sweep_task;
