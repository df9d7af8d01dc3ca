//! Job posting id validation

use std::sync::LazyLock;

use regex::Regex;

/// UUID v4: version nibble `4`, variant nibble one of `8 9 a b`, any case.
static UUID_V4_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$")
        .expect("Invalid UUID v4 regex")
});

/// Checks that `id` is present and shaped like a UUID v4.
pub fn is_valid_job_posting_id(id: Option<&str>) -> bool {
    id.is_some_and(|id| UUID_V4_REGEX.is_match(id))
}
