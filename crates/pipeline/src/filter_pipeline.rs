//! The FilterPipeline combines multiple filters.
//!
//! This module provides the main FilterPipeline struct that chains
//! filters together using the builder pattern. All filters combine with
//! logical AND.

use crate::traits::Filter;
use rayon::prelude::*;
use tracing;

/// Lists at least this long are filtered on the rayon pool.
pub const PARALLEL_THRESHOLD: usize = 4096;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(EqualityFilter::new("rating", rating, Criterion::Only(5)))
///     .add_filter(FlagFilter::new("verified", verified, TriState::Yes))
///     .add_filter(SearchFilter::new("ebert", fields));
///
/// let filtered = pipeline.apply(reviews);
/// ```
pub struct FilterPipeline<T> {
    filters: Vec<Box<dyn Filter<T>>>,
}

impl<T> FilterPipeline<T> {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    ///
    /// # Arguments
    /// * `filter` - Any type implementing the Filter trait
    ///
    /// # Returns
    /// Self for method chaining
    pub fn add_filter(mut self, filter: impl Filter<T> + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Number of filters that currently restrict anything.
    pub fn active_count(&self) -> usize {
        self.filters.iter().filter(|f| f.is_active()).count()
    }

    /// Whether one item passes every active filter.
    pub fn matches(&self, item: &T) -> bool {
        self.filters
            .iter()
            .filter(|f| f.is_active())
            .all(|f| f.matches(item))
    }
}

impl<T: Send> FilterPipeline<T> {
    /// Apply all active filters in sequence to the items.
    ///
    /// ## Algorithm
    /// 1. Start with the input items
    /// 2. For each active filter in order:
    ///    a. Log filter name and input count
    ///    b. Keep the items it matches, preserving order
    ///    c. Log output count
    /// 3. Return final filtered set
    ///
    /// With no active filter this returns the input unchanged.
    pub fn apply(&self, items: Vec<T>) -> Vec<T> {
        let mut current = items;
        for filter in self.filters.iter().filter(|f| f.is_active()) {
            if current.is_empty() {
                break;
            }
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = if current.len() >= PARALLEL_THRESHOLD {
                // collecting into a Vec keeps sequence order
                current
                    .into_par_iter()
                    .filter(|item| filter.matches(item))
                    .collect()
            } else {
                current
                    .into_iter()
                    .filter(|item| filter.matches(item))
                    .collect()
            };
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        current
    }
}

impl<T> Default for FilterPipeline<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::{Criterion, TriState};
    use crate::filters::{EqualityFilter, FlagFilter};
    use catalog::Review;

    fn rating(review: &Review) -> Option<u8> {
        review.rating
    }

    fn verified(review: &Review) -> Option<bool> {
        review.is_verified
    }

    fn reviews() -> Vec<Review> {
        vec![
            Review { id: 1, rating: Some(5), is_verified: Some(true), ..Default::default() },
            Review { id: 2, rating: Some(5), is_verified: Some(false), ..Default::default() },
            Review { id: 3, rating: Some(3), is_verified: Some(true), ..Default::default() },
            Review { id: 4, rating: None, is_verified: None, ..Default::default() },
        ]
    }

    #[test]
    fn test_empty_pipeline() {
        let pipeline = FilterPipeline::<Review>::new();

        let filtered = pipeline.apply(reviews());
        assert_eq!(filtered, reviews());
    }

    #[test]
    fn test_wildcard_filters_are_identity() {
        let pipeline = FilterPipeline::new()
            .add_filter(EqualityFilter::new("rating", rating, Criterion::All))
            .add_filter(FlagFilter::new("verified", verified, TriState::Any));

        assert_eq!(pipeline.active_count(), 0);
        assert_eq!(pipeline.apply(reviews()), reviews());
    }

    #[test]
    fn test_filters_combine_with_and() {
        let pipeline = FilterPipeline::new()
            .add_filter(EqualityFilter::new("rating", rating, Criterion::Only(5)))
            .add_filter(FlagFilter::new("verified", verified, TriState::Yes));

        let filtered = pipeline.apply(reviews());
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 1);
        assert!(pipeline.matches(&reviews()[0]));
        assert!(!pipeline.matches(&reviews()[1]));
    }

    #[test]
    fn test_empty_input_stays_empty() {
        let pipeline = FilterPipeline::new()
            .add_filter(EqualityFilter::new("rating", rating, Criterion::Only(5)));

        assert!(pipeline.apply(Vec::new()).is_empty());
    }

    #[test]
    fn test_parallel_path_preserves_order() {
        let items: Vec<Review> = (0..(PARALLEL_THRESHOLD as u64 * 2))
            .map(|id| Review {
                id,
                rating: Some((id % 5) as u8 + 1),
                ..Default::default()
            })
            .collect();

        let pipeline = FilterPipeline::new()
            .add_filter(EqualityFilter::new("rating", rating, Criterion::Only(5)));
        let filtered = pipeline.apply(items);

        assert_eq!(filtered.len(), PARALLEL_THRESHOLD * 2 / 5);
        assert!(filtered.windows(2).all(|pair| pair[0].id < pair[1].id));
    }
}
