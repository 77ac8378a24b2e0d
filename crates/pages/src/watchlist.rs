//! Watchlist: movies a user has queued, with priority and status.

use crate::error::{ParseKeyError, parse_key};
use catalog::{Priority, WatchStatus, WatchlistEntry};
use pipeline::filters::{Bounds, EqualityFilter, RangeFilter};
use pipeline::sort::{Direction, by_rank, by_text, by_timestamp};
use pipeline::{Criterion, FilterPipeline, PageConfig, SortKey, TextAccessor};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

pub struct WatchlistPage;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WatchlistCriteria {
    pub status: Criterion<WatchStatus>,
    pub priority: Criterion<Priority>,
    /// Release year, inclusive
    pub year: Bounds<i32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WatchlistSort {
    /// Most recently added first
    #[default]
    DateAdded,
    Oldest,
    TitleAsc,
    TitleDesc,
    /// high, then medium, then low
    Priority,
    /// Newest release first
    ReleaseYear,
}

impl WatchlistSort {
    pub const ALL: [WatchlistSort; 6] = [
        WatchlistSort::DateAdded,
        WatchlistSort::Oldest,
        WatchlistSort::TitleAsc,
        WatchlistSort::TitleDesc,
        WatchlistSort::Priority,
        WatchlistSort::ReleaseYear,
    ];
}

fn status(entry: &WatchlistEntry) -> Option<WatchStatus> {
    entry.status
}

fn priority(entry: &WatchlistEntry) -> Option<Priority> {
    entry.priority
}

fn release_year(entry: &WatchlistEntry) -> Option<i32> {
    entry.release_year
}

fn movie_title(entry: &WatchlistEntry) -> Option<&str> {
    entry.movie_title.as_deref()
}

fn notes(entry: &WatchlistEntry) -> Option<&str> {
    entry.notes.as_deref()
}

impl SortKey<WatchlistEntry> for WatchlistSort {
    fn compare(&self, a: &WatchlistEntry, b: &WatchlistEntry) -> Ordering {
        match self {
            WatchlistSort::DateAdded => by_timestamp(a.added_at, b.added_at, Direction::Descending),
            WatchlistSort::Oldest => by_timestamp(a.added_at, b.added_at, Direction::Ascending),
            WatchlistSort::TitleAsc => by_text(movie_title(a), movie_title(b), Direction::Ascending),
            WatchlistSort::TitleDesc => {
                by_text(movie_title(a), movie_title(b), Direction::Descending)
            }
            WatchlistSort::Priority => {
                by_rank(a.priority.map(Priority::rank), b.priority.map(Priority::rank))
            }
            WatchlistSort::ReleaseYear => {
                by_timestamp(a.release_year, b.release_year, Direction::Descending)
            }
        }
    }

    fn label(&self) -> &'static str {
        match self {
            WatchlistSort::DateAdded => "date_added",
            WatchlistSort::Oldest => "oldest",
            WatchlistSort::TitleAsc => "title_asc",
            WatchlistSort::TitleDesc => "title_desc",
            WatchlistSort::Priority => "priority",
            WatchlistSort::ReleaseYear => "release_year",
        }
    }
}

impl FromStr for WatchlistSort {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_key(WatchlistPage::NAME, s, &Self::ALL, |key| {
            <WatchlistSort as SortKey<WatchlistEntry>>::label(key)
        })
    }
}

impl fmt::Display for WatchlistSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(<WatchlistSort as SortKey<WatchlistEntry>>::label(self))
    }
}

impl PageConfig for WatchlistPage {
    type Item = WatchlistEntry;
    type Criteria = WatchlistCriteria;
    type Sort = WatchlistSort;

    const NAME: &'static str = "watchlist";

    fn filters(criteria: &WatchlistCriteria) -> FilterPipeline<WatchlistEntry> {
        FilterPipeline::new()
            .add_filter(EqualityFilter::new("status", status, criteria.status.clone()))
            .add_filter(EqualityFilter::new("priority", priority, criteria.priority.clone()))
            .add_filter(RangeFilter::new("release_year", release_year, criteria.year))
    }

    fn search_fields() -> Vec<TextAccessor<WatchlistEntry>> {
        vec![movie_title as TextAccessor<WatchlistEntry>, notes]
    }
}
