//! Core traits for the list pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible predicates to be applied to any list of records, plus the
//! accessor types used to read attributes off those records.

/// Reads one attribute off a record. `None` means the attribute is absent.
pub type Accessor<T, V> = fn(&T) -> Option<V>;

/// Reads one searchable text field off a record.
pub type TextAccessor<T> = for<'a> fn(&'a T) -> Option<&'a str>;

/// Core trait for filtering list items.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` lets the pipeline evaluate a filter from rayon workers
/// - An inactive filter (wildcard criterion, empty query, empty selection)
///   is skipped entirely, so it can never drop an item
pub trait Filter<T>: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Whether this filter restricts anything at all.
    fn is_active(&self) -> bool {
        true
    }

    /// Whether a single item passes this filter.
    fn matches(&self, item: &T) -> bool;
}
