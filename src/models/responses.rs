//! Response DTOs for the proxy API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::models::JobDetails;

/// Response body for a successful job lookup
#[derive(Debug, Clone, Serialize)]
pub struct JobLookupResponse {
    pub success: bool,
    #[serde(flatten)]
    pub job: JobDetails,
    /// Whether the result was served from the cache
    pub cached: bool,
}

impl JobLookupResponse {
    pub fn fresh(job: JobDetails) -> Self {
        Self {
            success: true,
            job,
            cached: false,
        }
    }

    pub fn cached(job: JobDetails) -> Self {
        Self {
            success: true,
            job,
            cached: true,
        }
    }
}

/// Response body for an accepted application
#[derive(Debug, Clone, Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub message: String,
}

impl SubmitResponse {
    pub fn submitted() -> Self {
        Self {
            success: true,
            message: "Application submitted successfully!".to_string(),
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub expired: u64,
    pub evictions: u64,
    pub total_entries: usize,
    pub capacity: usize,
    /// hits / (hits + misses)
    pub hit_rate: f64,
}

impl StatsResponse {
    pub fn new(stats: &CacheStats, capacity: usize) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            expired: stats.expired,
            evictions: stats.evictions,
            total_entries: stats.total_entries,
            capacity,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn job() -> JobDetails {
        JobDetails {
            title: "Engineer".to_string(),
            department: "R&D".to_string(),
            location: "Berlin".to_string(),
        }
    }

    #[test]
    fn test_lookup_response_is_flat() {
        let value = serde_json::to_value(JobLookupResponse::fresh(job())).unwrap();
        assert_eq!(
            value,
            json!({
                "success": true,
                "title": "Engineer",
                "department": "R&D",
                "location": "Berlin",
                "cached": false
            })
        );
    }

    #[test]
    fn test_lookup_response_cached_flag() {
        let value = serde_json::to_value(JobLookupResponse::cached(job())).unwrap();
        assert_eq!(value["cached"], json!(true));
    }

    #[test]
    fn test_submit_response_serialize() {
        let json = serde_json::to_string(&SubmitResponse::submitted()).unwrap();
        assert!(json.contains("\"success\":true"));
        assert!(json.contains("submitted successfully"));
    }

    #[test]
    fn test_stats_response_hit_rate() {
        let stats = CacheStats {
            hits: 80,
            misses: 20,
            expired: 5,
            evictions: 1,
            total_entries: 42,
        };
        let resp = StatsResponse::new(&stats, 100);
        assert!((resp.hit_rate - 0.8).abs() < 0.001);
        assert_eq!(resp.capacity, 100);
    }

    #[test]
    fn test_health_response_serialize() {
        let json = serde_json::to_string(&HealthResponse::healthy()).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }
}
