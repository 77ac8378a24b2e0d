//! # Catalog Crate
//!
//! Domain records for the critic platform's list pages and the code that
//! turns backend payloads into them.
//!
//! ## Main Components
//!
//! - **types**: Records (Review, HistoryEntry, WatchlistEntry, AwardEntry),
//!   enums (Priority, WatchStatus) and the `ListItem`/`Votable` traits
//! - **parser**: Decode arrays or `{items, total}` envelopes, load fixtures
//! - **error**: Error types for loading and parsing
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{parser, Review};
//! use std::path::Path;
//!
//! let reviews: Vec<Review> = parser::load_items_from_file(Path::new("fixtures/reviews.json"))?;
//! println!("Loaded {} reviews", reviews.len());
//! ```

pub mod error;
pub mod parser;
pub mod types;

pub use error::{CatalogError, Result};
pub use parser::ListPayload;
pub use types::{
    // Type aliases
    AwardId,
    HistoryId,
    ReviewId,
    WatchlistId,
    // Records
    Author,
    AwardEntry,
    HistoryEntry,
    Review,
    WatchlistEntry,
    // Enums
    Priority,
    WatchStatus,
    // Traits
    ListItem,
    Votable,
};
