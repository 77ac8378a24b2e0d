//! Reviews tab: critic and user reviews of a movie or by a profile.

use crate::error::{ParseKeyError, parse_key};
use catalog::Review;
use pipeline::filters::{EqualityFilter, FlagFilter};
use pipeline::sort::{Direction, by_number, by_timestamp};
use pipeline::{Criterion, FilterPipeline, PageConfig, SortKey, TextAccessor, TriState};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

pub struct ReviewsPage;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewCriteria {
    pub rating: Criterion<u8>,
    pub verified: TriState,
    pub spoilers: TriState,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReviewSort {
    #[default]
    Newest,
    Oldest,
    HighestRated,
    LowestRated,
    MostHelpful,
    MostComments,
}

impl ReviewSort {
    pub const ALL: [ReviewSort; 6] = [
        ReviewSort::Newest,
        ReviewSort::Oldest,
        ReviewSort::HighestRated,
        ReviewSort::LowestRated,
        ReviewSort::MostHelpful,
        ReviewSort::MostComments,
    ];
}

// Accessor table

fn rating(review: &Review) -> Option<u8> {
    review.rating
}

fn verified(review: &Review) -> Option<bool> {
    review.is_verified
}

fn spoilers(review: &Review) -> Option<bool> {
    review.contains_spoilers
}

fn display_name(review: &Review) -> Option<&str> {
    review.author.as_ref()?.display_name.as_deref()
}

fn username(review: &Review) -> Option<&str> {
    review.author.as_ref()?.username.as_deref()
}

fn movie_title(review: &Review) -> Option<&str> {
    review.movie_title.as_deref()
}

fn body(review: &Review) -> Option<&str> {
    review.body.as_deref()
}

impl SortKey<Review> for ReviewSort {
    fn compare(&self, a: &Review, b: &Review) -> Ordering {
        match self {
            ReviewSort::Newest => by_timestamp(a.created_at, b.created_at, Direction::Descending),
            ReviewSort::Oldest => by_timestamp(a.created_at, b.created_at, Direction::Ascending),
            ReviewSort::HighestRated => by_number(
                a.rating.map(f64::from),
                b.rating.map(f64::from),
                Direction::Descending,
            ),
            ReviewSort::LowestRated => by_number(
                a.rating.map(f64::from),
                b.rating.map(f64::from),
                Direction::Ascending,
            ),
            ReviewSort::MostHelpful => by_number(
                a.helpful_count.map(|n| n as f64),
                b.helpful_count.map(|n| n as f64),
                Direction::Descending,
            ),
            ReviewSort::MostComments => by_number(
                a.comment_count.map(f64::from),
                b.comment_count.map(f64::from),
                Direction::Descending,
            ),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ReviewSort::Newest => "newest",
            ReviewSort::Oldest => "oldest",
            ReviewSort::HighestRated => "highest_rated",
            ReviewSort::LowestRated => "lowest_rated",
            ReviewSort::MostHelpful => "most_helpful",
            ReviewSort::MostComments => "most_comments",
        }
    }
}

impl FromStr for ReviewSort {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_key(ReviewsPage::NAME, s, &Self::ALL, |key| {
            <ReviewSort as SortKey<Review>>::label(key)
        })
    }
}

impl fmt::Display for ReviewSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(<ReviewSort as SortKey<Review>>::label(self))
    }
}

impl PageConfig for ReviewsPage {
    type Item = Review;
    type Criteria = ReviewCriteria;
    type Sort = ReviewSort;

    const NAME: &'static str = "reviews";

    fn filters(criteria: &ReviewCriteria) -> FilterPipeline<Review> {
        FilterPipeline::new()
            .add_filter(EqualityFilter::new("rating", rating, criteria.rating.clone()))
            .add_filter(FlagFilter::new("verified", verified, criteria.verified))
            .add_filter(FlagFilter::new("spoilers", spoilers, criteria.spoilers))
    }

    fn search_fields() -> Vec<TextAccessor<Review>> {
        vec![
            display_name as TextAccessor<Review>,
            username,
            movie_title,
            body,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::Author;
    use chrono::{TimeZone, Utc};
    use pipeline::ListState;

    fn review(id: u64, rating: u8, day: u32) -> Review {
        Review {
            id,
            rating: Some(rating),
            created_at: Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).single(),
            ..Default::default()
        }
    }

    #[test]
    fn test_newest_first_by_default() {
        let mut state = ListState::<ReviewsPage>::new();
        state.replace_source(vec![review(1, 3, 1), review(2, 4, 9), review(3, 5, 5)]);

        let ids: Vec<u64> = state.view().items.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_spoiler_and_verified_switches() {
        let items = vec![
            Review { id: 1, is_verified: Some(true), contains_spoilers: Some(false), ..Default::default() },
            Review { id: 2, is_verified: Some(true), contains_spoilers: Some(true), ..Default::default() },
            Review { id: 3, is_verified: Some(false), contains_spoilers: Some(false), ..Default::default() },
        ];
        let mut state = ListState::<ReviewsPage>::new();
        state.replace_source(items);
        state.update_criteria(|c| {
            c.verified = TriState::Yes;
            c.spoilers = TriState::No;
        });

        let ids: Vec<u64> = state.view().items.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn test_search_covers_author_and_body() {
        let items = vec![
            Review {
                id: 1,
                author: Some(Author {
                    display_name: Some("Film Buff".to_string()),
                    username: Some("cinephile42".to_string()),
                }),
                ..Default::default()
            },
            Review { id: 2, body: Some("A CINEPHILE's dream".to_string()), ..Default::default() },
            Review { id: 3, body: Some("meh".to_string()), ..Default::default() },
        ];
        let mut state = ListState::<ReviewsPage>::new();
        state.replace_source(items);
        state.set_query("cinephile");

        assert_eq!(state.view().total, 2);
    }

    #[test]
    fn test_most_helpful_treats_missing_as_zero() {
        let items = vec![
            Review { id: 1, helpful_count: None, ..Default::default() },
            Review { id: 2, helpful_count: Some(3), ..Default::default() },
            Review { id: 3, helpful_count: Some(-2), ..Default::default() },
        ];
        let sorted = pipeline::sort_items(&items, ReviewSort::MostHelpful);
        let ids: Vec<u64> = sorted.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn test_sort_key_names() {
        assert_eq!("highest-rated".parse::<ReviewSort>().unwrap(), ReviewSort::HighestRated);
        assert_eq!(ReviewSort::MostComments.to_string(), "most_comments");

        let err = "loudest".parse::<ReviewSort>().unwrap_err();
        assert!(err.to_string().contains("newest"));
    }
}
