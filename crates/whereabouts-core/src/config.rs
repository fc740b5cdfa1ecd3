// ── Fetch configuration ──
//
// Everything needed to perform the one outbound fetch. Built by the
// config crate (profiles) or directly from CLI flags.

use std::time::Duration;

use url::Url;

use whereabouts_api::DEFAULT_ENDPOINT;

/// Configuration for the single fetch a run performs.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// API endpoint. Overridable for self-hosted generators and tests.
    pub endpoint: Url,
    /// Number of records to request.
    pub results: u32,
    /// Seed string for a reproducible dataset.
    pub seed: Option<String>,
    /// Comma-separated nationality filter (e.g. `"us,gb"`).
    pub nat: Option<String>,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL"),
            results: 20,
            seed: None,
            nat: None,
            timeout: Duration::from_secs(30),
        }
    }
}
