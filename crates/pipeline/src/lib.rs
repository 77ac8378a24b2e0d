//! Pipeline for filtering, sorting and windowing list pages.
//!
//! This crate provides:
//! - Filter trait and five generic filter kinds (equality, flag,
//!   membership, range, search)
//! - FilterPipeline for composing filters with logical AND
//! - SortKey comparators and a stable copy-then-sort
//! - Window for the accumulating "load more" pagination
//! - ListState, which wires the stages to one page's Source Store
//!
//! ## Architecture
//! A page view is recomputed from scratch on every read:
//! 1. Filters narrow the Source Store (criteria first, then free-text search)
//! 2. The sort key orders the survivors, preserving input order on ties
//! 3. The window exposes the first `page * page_size` items and `has_more`
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::ListState;
//! use pages::{ReviewsPage, ReviewSort};
//!
//! let mut state = ListState::<ReviewsPage>::new();
//! state.replace_source(reviews);
//! state.update_criteria(|c| c.rating = Criterion::Only(5));
//! state.set_sort(ReviewSort::HighestRated);
//!
//! let view = state.view();
//! let more = state.load_more();
//! ```

pub mod criteria;
pub mod filter_pipeline;
pub mod filters;
pub mod overlay;
pub mod page;
pub mod sort;
pub mod state;
pub mod traits;
pub mod window;

// Re-export main types
pub use criteria::{Criterion, TriState};
pub use filter_pipeline::FilterPipeline;
pub use filters::Bounds;
pub use overlay::{SpeculativeOverlay, VoteTicket};
pub use page::PageConfig;
pub use sort::{Direction, SortKey, sort_items};
pub use state::ListState;
pub use traits::{Accessor, Filter, TextAccessor};
pub use window::{PageView, Window, paginate};
