//! Host side of the list pages: fetching, request ordering and mutations.
//!
//! The pipeline crate is synchronous and knows nothing about the network.
//! This crate wraps one page's [`pipeline::ListState`] in a
//! [`ListOrchestrator`] that:
//! - Fetches the Source Store through a [`ListSource`]
//! - Discards responses that arrive after a newer request was issued
//! - Aborts in-flight fetches on refresh and on shutdown
//! - Applies votes and removals optimistically, undoing them on failure
//! - Reports failures through an injected [`Notifier`]

pub mod config;
pub mod notify;
pub mod orchestrator;
pub mod sink;
pub mod source;

pub use config::HostConfig;
pub use notify::{Notice, NoticeLevel, Notifier, TracingNotifier};
pub use orchestrator::{FetchOutcome, ListOrchestrator};
pub use sink::{RemoveSink, VoteSink};
pub use source::{EndpointSource, ListSource, StaticSource};
