//! Free-text search across several fields of an item.

use crate::traits::{Filter, TextAccessor};

/// Case-insensitive substring search.
///
/// ## Algorithm
/// 1. A blank query disables the filter
/// 2. Each field is lowercased and checked for the lowercased query
/// 3. A hit on any single field is enough (OR across fields)
pub struct SearchFilter<T> {
    needle: String,
    fields: Vec<TextAccessor<T>>,
}

impl<T> SearchFilter<T> {
    /// Create a new SearchFilter.
    ///
    /// # Arguments
    /// * `query` - Raw user input; surrounding whitespace is ignored
    /// * `fields` - Accessors for the searchable text fields
    pub fn new(query: &str, fields: Vec<TextAccessor<T>>) -> Self {
        Self {
            needle: query.trim().to_lowercase(),
            fields,
        }
    }
}

impl<T> Filter<T> for SearchFilter<T> {
    fn name(&self) -> &str {
        "search"
    }

    fn is_active(&self) -> bool {
        !self.needle.is_empty()
    }

    fn matches(&self, item: &T) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        self.fields.iter().any(|field| {
            field(item).is_some_and(|text| text.to_lowercase().contains(&self.needle))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{Author, Review};

    fn display_name(review: &Review) -> Option<&str> {
        review.author.as_ref()?.display_name.as_deref()
    }

    fn username(review: &Review) -> Option<&str> {
        review.author.as_ref()?.username.as_deref()
    }

    fn review(display_name: &str, username: &str) -> Review {
        Review {
            author: Some(Author {
                display_name: Some(display_name.to_string()),
                username: Some(username.to_string()),
            }),
            ..Default::default()
        }
    }

    fn fields() -> Vec<TextAccessor<Review>> {
        vec![display_name, username]
    }

    #[test]
    fn test_search_matches_any_field_case_insensitively() {
        let filter = SearchFilter::new("ROGER", fields());

        assert!(filter.matches(&review("Roger Ebert", "rebert")));
        assert!(filter.matches(&review("R. E.", "roger_e")));
        assert!(!filter.matches(&review("Pauline Kael", "pkael")));
    }

    #[test]
    fn test_blank_query_is_inactive() {
        let filter = SearchFilter::new("   ", fields());

        assert!(!filter.is_active());
        assert!(filter.matches(&Review::default()));
    }

    #[test]
    fn test_missing_fields_do_not_match() {
        let filter = SearchFilter::new("kael", fields());
        assert!(!filter.matches(&Review::default()));
    }
}
