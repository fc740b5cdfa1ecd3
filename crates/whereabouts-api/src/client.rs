// Hand-crafted async HTTP client for the randomuser.me API.
//
// Single endpoint, unauthenticated, JSON responses. Result count, seed,
// and nationality filter are query parameters.

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::Error;
use crate::transport::TransportConfig;
use crate::types::UserPage;

/// Public endpoint of the user generator.
pub const DEFAULT_ENDPOINT: &str = "https://randomuser.me/api/";

// ── Error response shape ─────────────────────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    error: Option<String>,
}

// ── Query ────────────────────────────────────────────────────────────

/// Query parameters for one fetch.
#[derive(Debug, Clone)]
pub struct UserQuery {
    /// Number of records to generate (the API caps this at 5000).
    pub results: u32,
    /// Seed string for a reproducible page.
    pub seed: Option<String>,
    /// Comma-separated nationality filter (e.g. `"us,gb"`).
    pub nat: Option<String>,
}

impl Default for UserQuery {
    fn default() -> Self {
        Self {
            results: 20,
            seed: None,
            nat: None,
        }
    }
}

impl UserQuery {
    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("results", self.results.to_string())];
        if let Some(ref seed) = self.seed {
            params.push(("seed", seed.clone()));
        }
        if let Some(ref nat) = self.nat {
            params.push(("nat", nat.clone()));
        }
        params
    }
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the randomuser.me API.
pub struct RandomUserClient {
    http: reqwest::Client,
    base_url: Url,
}

impl RandomUserClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from an endpoint URL and transport config.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, http)
    }

    /// Wrap an existing `reqwest::Client` (used by tests).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Url::parse(base_url)?;
        Ok(Self { http, base_url })
    }

    // ── Public API ───────────────────────────────────────────────────

    /// Fetch one page of generated users.
    ///
    /// This is the crate's only operation: at-most-once, no retry, no
    /// backoff. The transport timeout bounds how long it can take.
    pub async fn fetch_users(&self, query: &UserQuery) -> Result<UserPage, Error> {
        let params = query.params();
        debug!(url = %self.base_url, ?params, "GET user page");

        let resp = self
            .http
            .get(self.base_url.clone())
            .query(&params)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview = &body[..body.len().min(200)];
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();

        // The API wraps failures as `{"error": "..."}`.
        if let Ok(err) = serde_json::from_str::<ErrorResponse>(&raw) {
            if let Some(message) = err.error {
                return Error::Api {
                    status: status.as_u16(),
                    message,
                };
            }
        }

        Error::Api {
            status: status.as_u16(),
            message: if raw.is_empty() {
                status.to_string()
            } else {
                raw
            },
        }
    }
}
