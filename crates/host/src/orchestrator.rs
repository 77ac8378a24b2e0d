//! # List Orchestrator
//!
//! This module coordinates one list page against its backend:
//! 1. Fetch the Source Store (aborting whatever fetch is still in flight)
//! 2. Apply the response only if no newer request was issued meanwhile
//! 3. Forward criteria, sort and search changes to the page state
//! 4. Serve "load more", dropping requests made under outdated criteria
//! 5. Apply votes and removals optimistically, undoing them on failure
//!
//! ## Request ordering
//!
//! Every `refresh()` takes a new fetch generation. A response is applied
//! only while its generation is still the latest, so an older, slower
//! response can never overwrite a newer one. Criteria, sort and query
//! changes take a new view generation, which invalidates pending
//! "load more" requests.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tokio::sync::Mutex;
use tokio::task::AbortHandle;
use tracing::{debug, info, warn};

use api_client::ApiError;
use catalog::{ListItem, Votable};
use pipeline::{ListState, PageConfig, PageView};

use crate::config::HostConfig;
use crate::notify::{Notice, Notifier, TracingNotifier};
use crate::sink::{RemoveSink, VoteSink};
use crate::source::ListSource;

type ItemId<P> = <<P as PageConfig>::Item as ListItem>::Id;

/// What happened to one `refresh()` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response replaced the Source Store
    Applied { count: usize },
    /// The response arrived after a newer request and was dropped
    Stale,
    /// The fetch was aborted before it completed
    Superseded,
}

/// Drives one page's [`ListState`] from a [`ListSource`].
pub struct ListOrchestrator<P: PageConfig> {
    state: Mutex<ListState<P>>,
    source: Arc<dyn ListSource<P::Item>>,
    notifier: Arc<dyn Notifier>,
    votes: Option<Arc<dyn VoteSink<ItemId<P>>>>,
    removals: Option<Arc<dyn RemoveSink<ItemId<P>>>>,
    load_more_delay: Duration,
    fetch_generation: AtomicU64,
    view_generation: AtomicU64,
    in_flight: Mutex<Option<AbortHandle>>,
    last_error: Mutex<Option<String>>,
}

impl<P: PageConfig> ListOrchestrator<P> {
    /// Create an orchestrator with an empty Source Store
    ///
    /// # Arguments
    /// * `source` - Where `refresh()` fetches the page's items from
    /// * `config` - Page size override and load-more latency are taken from here
    pub fn new(source: Arc<dyn ListSource<P::Item>>, config: &HostConfig) -> Self {
        let state = match config.page_size_override {
            Some(page_size) => ListState::new().with_page_size(page_size),
            None => ListState::new(),
        };
        Self {
            state: Mutex::new(state),
            source,
            notifier: Arc::new(TracingNotifier),
            votes: None,
            removals: None,
            load_more_delay: config.load_more_delay,
            fetch_generation: AtomicU64::new(0),
            view_generation: AtomicU64::new(0),
            in_flight: Mutex::new(None),
            last_error: Mutex::new(None),
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_vote_sink(mut self, sink: Arc<dyn VoteSink<ItemId<P>>>) -> Self {
        self.votes = Some(sink);
        self
    }

    pub fn with_remove_sink(mut self, sink: Arc<dyn RemoveSink<ItemId<P>>>) -> Self {
        self.removals = Some(sink);
        self
    }

    /// Fetch the Source Store again.
    ///
    /// The previous in-flight fetch, if any, is aborted. On failure the
    /// Source Store is left untouched, the error is reported through the
    /// notifier and kept for [`ListOrchestrator::last_error`].
    pub async fn refresh(&self) -> Result<FetchOutcome> {
        let start_time = Instant::now();

        // generations are handed out in the order fetches are aborted
        let (generation, handle) = {
            let mut in_flight = self.in_flight.lock().await;
            let generation = self.fetch_generation.fetch_add(1, Ordering::SeqCst) + 1;
            if let Some(previous) = in_flight.take() {
                debug!("{}: aborting in-flight fetch", P::NAME);
                previous.abort();
            }
            let source = self.source.clone();
            let handle = tokio::spawn(async move { source.fetch().await });
            *in_flight = Some(handle.abort_handle());
            (generation, handle)
        };
        info!("{}: fetching from {} (generation {})", P::NAME, self.source.describe(), generation);

        let fetched = match handle.await {
            Ok(fetched) => fetched,
            Err(err) if err.is_cancelled() => {
                debug!("{}: fetch generation {} was aborted", P::NAME, generation);
                return Ok(FetchOutcome::Superseded);
            }
            Err(err) => {
                return Err(anyhow::Error::new(err).context(format!("{} fetch task panicked", P::NAME)));
            }
        };

        let outcome = self.apply_fetch(generation, fetched).await?;
        if let FetchOutcome::Applied { count } = outcome {
            info!(
                "{}: loaded {} items in {:.2?}",
                P::NAME,
                count,
                start_time.elapsed()
            );
        }
        Ok(outcome)
    }

    /// Re-issue the last fetch, typically after it failed.
    pub async fn retry(&self) -> Result<FetchOutcome> {
        self.refresh().await
    }

    async fn apply_fetch(
        &self,
        generation: u64,
        fetched: std::result::Result<Vec<P::Item>, ApiError>,
    ) -> Result<FetchOutcome> {
        let mut state = self.state.lock().await;
        let current = self.fetch_generation.load(Ordering::SeqCst);
        if generation != current {
            warn!(
                "{}: discarding stale response (generation {}, current {})",
                P::NAME,
                generation,
                current
            );
            return Ok(FetchOutcome::Stale);
        }

        match fetched {
            Ok(items) => {
                let count = items.len();
                state.replace_source(items);
                self.view_generation.fetch_add(1, Ordering::SeqCst);
                *self.last_error.lock().await = None;
                Ok(FetchOutcome::Applied { count })
            }
            Err(err) => {
                let message = err.to_string();
                warn!("{}: fetch failed: {}", P::NAME, message);
                *self.last_error.lock().await = Some(message.clone());
                self.notifier
                    .notify(Notice::error(format!("Could not load {}: {}", P::NAME, message)));
                Err(anyhow::Error::new(err).context(format!("Failed to load {}", P::NAME)))
            }
        }
    }

    /// Message of the last failed fetch, cleared by the next successful one.
    pub async fn last_error(&self) -> Option<String> {
        self.last_error.lock().await.clone()
    }

    /// Whether a fetch is currently in flight.
    pub async fn is_loading(&self) -> bool {
        self.in_flight
            .lock()
            .await
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub async fn view(&self) -> PageView<P::Item> {
        self.state.lock().await.view()
    }

    pub async fn criteria(&self) -> P::Criteria {
        self.state.lock().await.criteria().clone()
    }

    pub async fn sort(&self) -> P::Sort {
        self.state.lock().await.sort()
    }

    pub async fn query(&self) -> String {
        self.state.lock().await.query().to_string()
    }

    pub async fn set_criteria(&self, criteria: P::Criteria) {
        let mut state = self.state.lock().await;
        state.set_criteria(criteria);
        self.view_generation.fetch_add(1, Ordering::SeqCst);
    }

    pub async fn update_criteria(&self, update: impl FnOnce(&mut P::Criteria)) {
        let mut state = self.state.lock().await;
        state.update_criteria(update);
        self.view_generation.fetch_add(1, Ordering::SeqCst);
    }

    pub async fn set_sort(&self, sort: P::Sort) {
        let mut state = self.state.lock().await;
        state.set_sort(sort);
        self.view_generation.fetch_add(1, Ordering::SeqCst);
    }

    pub async fn set_query(&self, query: impl Into<String>) {
        let mut state = self.state.lock().await;
        state.set_query(query);
        self.view_generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Reveal the next page.
    ///
    /// Returns the newly appended items, or `None` when criteria, sort or
    /// query changed while the request was pending.
    pub async fn load_more(&self) -> Option<Vec<P::Item>> {
        let requested = self.view_generation.load(Ordering::SeqCst);
        if !self.load_more_delay.is_zero() {
            tokio::time::sleep(self.load_more_delay).await;
        }

        let mut state = self.state.lock().await;
        if self.view_generation.load(Ordering::SeqCst) != requested {
            debug!("{}: dropping load more issued under outdated criteria", P::NAME);
            return None;
        }
        Some(state.load_more())
    }

    /// Remove an item right away and confirm with the backend.
    ///
    /// When the backend refuses, the item goes back to its original
    /// position unless a fetch replaced the Source Store meanwhile.
    pub async fn remove(&self, id: ItemId<P>) -> Result<()> {
        let sink = self
            .removals
            .clone()
            .with_context(|| format!("Removing is not supported on {}", P::NAME))?;
        let (index, item) = self
            .state
            .lock()
            .await
            .remove(&id)
            .with_context(|| format!("No item {} on {}", id, P::NAME))?;

        if let Err(err) = sink.send_remove(id.clone()).await {
            let mut state = self.state.lock().await;
            if state.find(&id).is_none() {
                state.restore(index, item);
            }
            warn!("{}: removing {} failed: {}", P::NAME, id, err);
            self.notifier
                .notify(Notice::error(format!("Could not remove item {}: {}", id, err)));
            return Err(anyhow::Error::new(err).context(format!("Failed to remove {}", id)));
        }

        info!("{}: removed {}", P::NAME, id);
        self.notifier
            .notify(Notice::info(format!("Removed item {} from {}", id, P::NAME)));
        Ok(())
    }

    /// Abort the in-flight fetch; any response still on its way is dropped.
    pub async fn shutdown(&self) {
        let mut in_flight = self.in_flight.lock().await;
        self.fetch_generation.fetch_add(1, Ordering::SeqCst);
        if let Some(handle) = in_flight.take() {
            debug!("{}: shutting down, aborting in-flight fetch", P::NAME);
            handle.abort();
        }
    }
}

impl<P: PageConfig> ListOrchestrator<P>
where
    P::Item: Votable,
{
    /// Vote on an item; returns the count now displayed.
    ///
    /// The count changes immediately. If the backend reports a count it
    /// replaces the speculative one; if the backend fails the vote is
    /// reverted and a notice is sent.
    pub async fn vote(&self, id: ItemId<P>, delta: i64) -> Result<i64> {
        let sink = self
            .votes
            .clone()
            .with_context(|| format!("Voting is not supported on {}", P::NAME))?;
        let (optimistic, ticket) = self
            .state
            .lock()
            .await
            .apply_vote(&id, delta)
            .with_context(|| format!("No item {} on {}", id, P::NAME))?;

        match sink.send_vote(id.clone(), delta).await {
            Ok(reported) => {
                let mut state = self.state.lock().await;
                let confirmed = reported.map(|count| state.confirm_vote(&ticket, count));
                if confirmed == Some(None) {
                    debug!("{}: vote on {} confirmed after a refresh, keeping fetched count", P::NAME, id);
                }
                Ok(state.votes(&id).unwrap_or(optimistic))
            }
            Err(err) => {
                let reverted = self.state.lock().await.revert_vote(&ticket);
                warn!("{}: vote on {} failed, reverted to {:?}: {}", P::NAME, id, reverted, err);
                self.notifier
                    .notify(Notice::error(format!("Could not record your vote: {}", err)));
                Err(anyhow::Error::new(err).context(format!("Failed to vote on {}", id)))
            }
        }
    }
}

impl<P: PageConfig> Drop for ListOrchestrator<P> {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.get_mut().take() {
            handle.abort();
        }
    }
}
