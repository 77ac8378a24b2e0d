//! # Pages Crate
//!
//! The four list pages of the critic platform, each expressed as a small
//! configuration object over the generic pipeline:
//!
//! | Page | Record | Criteria | Default sort |
//! |------|--------|----------|--------------|
//! | Reviews | `Review` | rating, verified, spoilers | newest |
//! | Watch history | `HistoryEntry` | rating, release year, rewatch | newest |
//! | Watchlist | `WatchlistEntry` | status, priority, release year | date added |
//! | Awards | `AwardEntry` | ceremonies, categories, year, won | year (desc) |
//!
//! ## Example Usage
//!
//! ```ignore
//! use pages::{WatchlistPage, WatchlistSort};
//! use pipeline::ListState;
//!
//! let mut state = ListState::<WatchlistPage>::new();
//! state.replace_source(entries);
//! state.set_sort(WatchlistSort::Priority);
//! ```

pub mod awards;
pub mod error;
pub mod history;
pub mod reviews;
pub mod watchlist;

pub use awards::{AwardCriteria, AwardSort, AwardsPage};
pub use error::ParseKeyError;
pub use history::{HistoryCriteria, HistoryPage, HistorySort};
pub use reviews::{ReviewCriteria, ReviewSort, ReviewsPage};
pub use watchlist::{WatchlistCriteria, WatchlistPage, WatchlistSort};
