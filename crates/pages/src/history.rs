//! Watch history: every viewing a user has logged.

use crate::error::{ParseKeyError, parse_key};
use catalog::HistoryEntry;
use pipeline::filters::{Bounds, EqualityFilter, FlagFilter, RangeFilter};
use pipeline::sort::{Direction, by_number, by_text, by_timestamp};
use pipeline::{Criterion, FilterPipeline, PageConfig, SortKey, TextAccessor, TriState};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

pub struct HistoryPage;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryCriteria {
    pub rating: Criterion<u8>,
    /// Release year, inclusive
    pub year: Bounds<i32>,
    pub rewatch: TriState,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HistorySort {
    #[default]
    Newest,
    Oldest,
    TitleAsc,
    TitleDesc,
    HighestRated,
    LowestRated,
}

impl HistorySort {
    pub const ALL: [HistorySort; 6] = [
        HistorySort::Newest,
        HistorySort::Oldest,
        HistorySort::TitleAsc,
        HistorySort::TitleDesc,
        HistorySort::HighestRated,
        HistorySort::LowestRated,
    ];
}

fn rating(entry: &HistoryEntry) -> Option<u8> {
    entry.rating
}

fn release_year(entry: &HistoryEntry) -> Option<i32> {
    entry.release_year
}

fn rewatch(entry: &HistoryEntry) -> Option<bool> {
    entry.is_rewatch
}

fn movie_title(entry: &HistoryEntry) -> Option<&str> {
    entry.movie_title.as_deref()
}

impl SortKey<HistoryEntry> for HistorySort {
    fn compare(&self, a: &HistoryEntry, b: &HistoryEntry) -> Ordering {
        let stars = |entry: &HistoryEntry| entry.rating.map(f64::from);
        match self {
            HistorySort::Newest => by_timestamp(a.watched_at, b.watched_at, Direction::Descending),
            HistorySort::Oldest => by_timestamp(a.watched_at, b.watched_at, Direction::Ascending),
            HistorySort::TitleAsc => by_text(movie_title(a), movie_title(b), Direction::Ascending),
            HistorySort::TitleDesc => by_text(movie_title(a), movie_title(b), Direction::Descending),
            HistorySort::HighestRated => by_number(stars(a), stars(b), Direction::Descending),
            HistorySort::LowestRated => by_number(stars(a), stars(b), Direction::Ascending),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            HistorySort::Newest => "newest",
            HistorySort::Oldest => "oldest",
            HistorySort::TitleAsc => "title_asc",
            HistorySort::TitleDesc => "title_desc",
            HistorySort::HighestRated => "highest_rated",
            HistorySort::LowestRated => "lowest_rated",
        }
    }
}

impl FromStr for HistorySort {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_key(HistoryPage::NAME, s, &Self::ALL, |key| {
            <HistorySort as SortKey<HistoryEntry>>::label(key)
        })
    }
}

impl fmt::Display for HistorySort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(<HistorySort as SortKey<HistoryEntry>>::label(self))
    }
}

impl PageConfig for HistoryPage {
    type Item = HistoryEntry;
    type Criteria = HistoryCriteria;
    type Sort = HistorySort;

    const NAME: &'static str = "history";

    fn filters(criteria: &HistoryCriteria) -> FilterPipeline<HistoryEntry> {
        FilterPipeline::new()
            .add_filter(EqualityFilter::new("rating", rating, criteria.rating.clone()))
            .add_filter(RangeFilter::new("release_year", release_year, criteria.year))
            .add_filter(FlagFilter::new("rewatch", rewatch, criteria.rewatch))
    }

    fn search_fields() -> Vec<TextAccessor<HistoryEntry>> {
        vec![movie_title as TextAccessor<HistoryEntry>]
    }
}
