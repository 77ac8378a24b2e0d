//! Where optimistic mutations are sent.

use async_trait::async_trait;

use api_client::{ApiClient, ApiError};

use crate::source::EndpointSource;

/// Accepts votes; returns the server's count when it reports one.
#[async_trait]
pub trait VoteSink<I: Send + 'static>: Send + Sync {
    async fn send_vote(&self, id: I, delta: i64) -> Result<Option<i64>, ApiError>;
}

/// Accepts removals of single items.
#[async_trait]
pub trait RemoveSink<I: Send + 'static>: Send + Sync {
    async fn send_remove(&self, id: I) -> Result<(), ApiError>;
}

#[async_trait]
impl VoteSink<u64> for ApiClient {
    async fn send_vote(&self, id: u64, delta: i64) -> Result<Option<i64>, ApiError> {
        self.vote(id, delta).await
    }
}

/// Removals go to the same collection the page was fetched from.
#[async_trait]
impl RemoveSink<u64> for EndpointSource {
    async fn send_remove(&self, id: u64) -> Result<(), ApiError> {
        self.client().remove(self.path(), id).await
    }
}
