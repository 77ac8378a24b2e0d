//! HTTP client for the critic platform's backend API.
//!
//! This crate provides a Rust client for the REST endpoints the list pages
//! consume. It handles:
//! - Building requests against a configurable base URL
//! - Decoding list responses (bare arrays or `{items, total}` envelopes)
//! - Mutations: vote on a review, update a watchlist status, remove an item
//!
//! Retries are deliberately absent: a failed call surfaces to the caller,
//! and retrying is a user action.

use catalog::{CatalogError, WatchStatus};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info};

/// Errors that can occur when talking to the backend
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to build HTTP client: {0}")]
    ClientInit(String),

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP status {code} from {url}: {body}")]
    HttpStatus { code: u16, url: String, body: String },

    #[error("Invalid response from {url}: {source}")]
    InvalidResponse {
        url: String,
        #[source]
        source: CatalogError,
    },
}

impl ApiError {
    /// Whether a user-triggered retry has a chance of succeeding.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Request(_) => true,
            Self::HttpStatus { code, .. } => matches!(code, 408 | 429 | 500 | 502 | 503 | 504),
            _ => false,
        }
    }
}

#[derive(Serialize)]
struct VoteBody {
    delta: i64,
}

#[derive(Serialize)]
struct StatusBody {
    status: WatchStatus,
}

/// Client for the backend API.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for `base_url` (e.g. "http://localhost:8000/api").
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend failure).
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::ClientInit(e.to_string()))?;
        info!("API client ready for {}", base_url);
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Fetch a list endpoint and decode its items.
    pub async fn fetch_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        let url = self.url(path);
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        let bytes = Self::check(response, &url).await?.bytes().await?;
        catalog::parser::parse_items(&bytes)
            .map_err(|source| ApiError::InvalidResponse { url, source })
    }

    /// Cast a vote on a review.
    ///
    /// Returns the server's count when the response carries one
    /// (`{"helpfulCount": n}` or `{"helpful_count": n}`).
    pub async fn vote(&self, review_id: u64, delta: i64) -> Result<Option<i64>, ApiError> {
        let url = self.url(&format!("reviews/{}/vote", review_id));
        debug!("POST {} (delta {})", url, delta);
        let response = self.client.post(&url).json(&VoteBody { delta }).send().await?;
        let body = Self::check(response, &url).await?.text().await?;
        let count = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|value| {
                value
                    .get("helpfulCount")
                    .or_else(|| value.get("helpful_count"))
                    .and_then(serde_json::Value::as_i64)
            });
        Ok(count)
    }

    /// Move a watchlist entry to another status.
    pub async fn update_status(&self, entry_id: u64, status: WatchStatus) -> Result<(), ApiError> {
        let url = self.url(&format!("watchlist/{}", entry_id));
        debug!("PUT {} (status {})", url, status);
        let response = self.client.put(&url).json(&StatusBody { status }).send().await?;
        Self::check(response, &url).await?;
        Ok(())
    }

    /// Delete one item from a collection endpoint (`DELETE {path}/{id}`).
    pub async fn remove(&self, path: &str, id: u64) -> Result<(), ApiError> {
        let url = self.url(&format!("{}/{}", path.trim_end_matches('/'), id));
        debug!("DELETE {}", url);
        let response = self.client.delete(&url).send().await?;
        Self::check(response, &url).await?;
        Ok(())
    }

    async fn check(response: reqwest::Response, url: &str) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Could not read error body".to_string());
        error!("{} returned {}", url, status);
        Err(ApiError::HttpStatus {
            code: status.as_u16(),
            url: url.to_string(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{Review, WatchlistEntry};
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn setup() -> (MockServer, ApiClient) {
        let server = MockServer::start().await;
        let client = ApiClient::new(format!("{}/api/", server.uri()), Duration::from_secs(5))
            .expect("client should build");
        (server, client)
    }

    #[tokio::test]
    async fn test_fetch_list_array() {
        let (server, client) = setup().await;
        Mock::given(method("GET"))
            .and(path("/api/reviews"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": 1, "rating": 5},
                {"id": 2, "rating": 3}
            ])))
            .mount(&server)
            .await;

        let reviews: Vec<Review> = client.fetch_list("/reviews").await.unwrap();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].rating, Some(5));
    }

    #[tokio::test]
    async fn test_fetch_list_envelope() {
        let (server, client) = setup().await;
        Mock::given(method("GET"))
            .and(path("/api/watchlist"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [{"id": 4, "priority": "high"}],
                "total": 1
            })))
            .mount(&server)
            .await;

        let entries: Vec<WatchlistEntry> = client.fetch_list("watchlist").await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].priority, Some(catalog::Priority::High));
    }

    #[tokio::test]
    async fn test_fetch_list_http_error() {
        let (server, client) = setup().await;
        Mock::given(method("GET"))
            .and(path("/api/reviews"))
            .respond_with(ResponseTemplate::new(503).set_body_string("down for maintenance"))
            .mount(&server)
            .await;

        let err = client.fetch_list::<Review>("reviews").await.unwrap_err();
        assert!(matches!(err, ApiError::HttpStatus { code: 503, .. }));
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn test_fetch_list_bad_payload() {
        let (server, client) = setup().await;
        Mock::given(method("GET"))
            .and(path("/api/reviews"))
            .respond_with(ResponseTemplate::new(200).set_body_string("\"nope\""))
            .mount(&server)
            .await;

        let err = client.fetch_list::<Review>("reviews").await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse { .. }));
        assert!(!err.is_transient());
    }

    #[tokio::test]
    async fn test_vote_returns_authoritative_count() {
        let (server, client) = setup().await;
        Mock::given(method("POST"))
            .and(path("/api/reviews/7/vote"))
            .and(body_json(serde_json::json!({"delta": 1})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"helpfulCount": 12})),
            )
            .mount(&server)
            .await;

        assert_eq!(client.vote(7, 1).await.unwrap(), Some(12));
    }

    #[tokio::test]
    async fn test_vote_without_count() {
        let (server, client) = setup().await;
        Mock::given(method("POST"))
            .and(path("/api/reviews/7/vote"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        assert_eq!(client.vote(7, -1).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_status() {
        let (server, client) = setup().await;
        Mock::given(method("PUT"))
            .and(path("/api/watchlist/3"))
            .and(body_json(serde_json::json!({"status": "watched"})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        client.update_status(3, WatchStatus::Watched).await.unwrap();
    }

    #[tokio::test]
    async fn test_remove() {
        let (server, client) = setup().await;
        Mock::given(method("DELETE"))
            .and(path("/api/watchlist/9"))
            .respond_with(ResponseTemplate::new(404).set_body_string("gone"))
            .mount(&server)
            .await;

        let err = client.remove("watchlist", 9).await.unwrap_err();
        assert!(matches!(err, ApiError::HttpStatus { code: 404, .. }));
    }
}
