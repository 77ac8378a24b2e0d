//! Per-page configuration.
//!
//! A list page is the generic pipeline plus a small configuration object:
//! which record it shows, what its filter settings look like, which sort
//! keys it offers and which fields free-text search looks at.

use crate::filter_pipeline::FilterPipeline;
use crate::sort::SortKey;
use crate::traits::TextAccessor;
use crate::window::DEFAULT_PAGE_SIZE;
use catalog::ListItem;
use std::fmt::Debug;

pub trait PageConfig: Send + Sync + 'static {
    type Item: ListItem;
    type Criteria: Default + Clone + Debug + Send + Sync;
    type Sort: SortKey<Self::Item> + Default;

    /// Page name used in logs.
    const NAME: &'static str;

    const PAGE_SIZE: usize = DEFAULT_PAGE_SIZE;

    /// Build the criteria-driven filters (search is added separately).
    fn filters(criteria: &Self::Criteria) -> FilterPipeline<Self::Item>;

    /// Text fields the search box matches against.
    fn search_fields() -> Vec<TextAccessor<Self::Item>>;
}
