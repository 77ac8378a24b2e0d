//! Filter keeping items whose attribute equals a chosen value.
//!
//! Used for star ratings ("show only 4-star reviews") and for enumerated
//! attributes such as watchlist status or priority.

use crate::criteria::Criterion;
use crate::traits::{Accessor, Filter};
use std::fmt::Debug;

/// Keeps items where `accessor(item) == value`.
///
/// ## Algorithm
/// 1. `Criterion::All` disables the filter
/// 2. An item whose attribute is missing fails (fail-closed)
/// 3. Otherwise compare for equality
pub struct EqualityFilter<T, V> {
    name: &'static str,
    accessor: Accessor<T, V>,
    criterion: Criterion<V>,
}

impl<T, V> EqualityFilter<T, V> {
    /// Create a new EqualityFilter.
    ///
    /// # Arguments
    /// * `name` - Attribute name, for logging
    /// * `accessor` - Reads the attribute off an item
    /// * `criterion` - Wanted value, or `Criterion::All`
    pub fn new(name: &'static str, accessor: Accessor<T, V>, criterion: Criterion<V>) -> Self {
        Self {
            name,
            accessor,
            criterion,
        }
    }
}

impl<T, V> Filter<T> for EqualityFilter<T, V>
where
    V: PartialEq + Debug + Send + Sync,
{
    fn name(&self) -> &str {
        self.name
    }

    fn is_active(&self) -> bool {
        !self.criterion.is_all()
    }

    fn matches(&self, item: &T) -> bool {
        match &self.criterion {
            Criterion::All => true,
            Criterion::Only(wanted) => (self.accessor)(item).is_some_and(|value| value == *wanted),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::Review;

    fn rating(review: &Review) -> Option<u8> {
        review.rating
    }

    fn review(id: u64, rating: Option<u8>) -> Review {
        Review {
            id,
            rating,
            ..Default::default()
        }
    }

    #[test]
    fn test_equality_filter() {
        let filter = EqualityFilter::new("rating", rating, Criterion::Only(4));

        assert!(filter.is_active());
        assert!(filter.matches(&review(1, Some(4))));
        assert!(!filter.matches(&review(2, Some(5))));
    }

    #[test]
    fn test_missing_attribute_fails_closed() {
        let filter = EqualityFilter::new("rating", rating, Criterion::Only(4));
        assert!(!filter.matches(&review(1, None)));
    }

    #[test]
    fn test_wildcard_passes_everything() {
        let filter = EqualityFilter::new("rating", rating, Criterion::All);

        assert!(!filter.is_active());
        assert!(filter.matches(&review(1, None)));
        assert!(filter.matches(&review(2, Some(1))));
    }
}
