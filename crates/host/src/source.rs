//! Where a page's Source Store comes from.

use std::fmt::Debug;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use api_client::{ApiClient, ApiError};
use pipeline::PageConfig;

/// Produces the full result set for one page.
#[async_trait]
pub trait ListSource<T>: Send + Sync {
    /// Short description for logs ("GET reviews", "fixture").
    fn describe(&self) -> String;

    async fn fetch(&self) -> Result<Vec<T>, ApiError>;
}

/// A backend list endpoint.
#[derive(Debug, Clone)]
pub struct EndpointSource {
    client: ApiClient,
    path: String,
}

impl EndpointSource {
    pub fn new(client: ApiClient, path: impl Into<String>) -> Self {
        Self {
            client,
            path: path.into(),
        }
    }

    /// The endpoint named after a page (`reviews`, `watchlist`, ...).
    pub fn for_page<P: PageConfig>(client: ApiClient) -> Self {
        Self::new(client, P::NAME)
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

#[async_trait]
impl<T> ListSource<T> for EndpointSource
where
    T: DeserializeOwned + Send + 'static,
{
    fn describe(&self) -> String {
        format!("GET {}/{}", self.client.base_url(), self.path)
    }

    async fn fetch(&self) -> Result<Vec<T>, ApiError> {
        self.client.fetch_list(&self.path).await
    }
}

/// An in-memory result set, e.g. loaded from a fixture file.
#[derive(Debug, Clone)]
pub struct StaticSource<T> {
    items: Vec<T>,
}

impl<T> StaticSource<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }
}

#[async_trait]
impl<T> ListSource<T> for StaticSource<T>
where
    T: Clone + Debug + Send + Sync + 'static,
{
    fn describe(&self) -> String {
        format!("{} static items", self.items.len())
    }

    async fn fetch(&self) -> Result<Vec<T>, ApiError> {
        debug!("Serving {} static items", self.items.len());
        Ok(self.items.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::Review;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_static_source_returns_copies() {
        let source = StaticSource::new(vec![Review { id: 1, ..Default::default() }]);

        let first = ListSource::<Review>::fetch(&source).await.unwrap();
        let second = ListSource::<Review>::fetch(&source).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 1);
    }

    #[tokio::test]
    async fn test_endpoint_source_fetches_page_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/reviews"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!([{"id": 3}, {"id": 4}])),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri(), Duration::from_secs(5)).unwrap();
        let source = EndpointSource::for_page::<pages::ReviewsPage>(client);
        let reviews = ListSource::<Review>::fetch(&source).await.unwrap();

        assert_eq!(source.path(), "reviews");
        assert_eq!(reviews.iter().map(|r| r.id).collect::<Vec<_>>(), vec![3, 4]);
    }
}
