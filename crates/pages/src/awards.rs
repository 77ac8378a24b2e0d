//! Movie awards: nominations and wins across ceremonies.

use crate::error::{ParseKeyError, parse_key};
use catalog::AwardEntry;
use pipeline::filters::{Bounds, FlagFilter, MembershipFilter, RangeFilter};
use pipeline::sort::{Direction, by_text, by_timestamp};
use pipeline::{FilterPipeline, PageConfig, SortKey, TextAccessor, TriState};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

pub struct AwardsPage;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AwardCriteria {
    /// Empty means every ceremony
    pub ceremonies: HashSet<String>,
    /// Empty means every category
    pub categories: HashSet<String>,
    pub year: Bounds<i32>,
    pub won: TriState,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AwardSort {
    #[default]
    YearDesc,
    YearAsc,
    TitleAsc,
    Ceremony,
}

impl AwardSort {
    pub const ALL: [AwardSort; 4] = [
        AwardSort::YearDesc,
        AwardSort::YearAsc,
        AwardSort::TitleAsc,
        AwardSort::Ceremony,
    ];
}

fn ceremony(award: &AwardEntry) -> Option<String> {
    award.ceremony.clone()
}

fn category(award: &AwardEntry) -> Option<String> {
    award.category.clone()
}

fn year(award: &AwardEntry) -> Option<i32> {
    award.year
}

fn won(award: &AwardEntry) -> Option<bool> {
    award.won
}

fn movie_title(award: &AwardEntry) -> Option<&str> {
    award.movie_title.as_deref()
}

fn category_text(award: &AwardEntry) -> Option<&str> {
    award.category.as_deref()
}

fn nominee(award: &AwardEntry) -> Option<&str> {
    award.nominee.as_deref()
}

impl SortKey<AwardEntry> for AwardSort {
    fn compare(&self, a: &AwardEntry, b: &AwardEntry) -> Ordering {
        match self {
            AwardSort::YearDesc => by_timestamp(a.year, b.year, Direction::Descending),
            AwardSort::YearAsc => by_timestamp(a.year, b.year, Direction::Ascending),
            AwardSort::TitleAsc => by_text(movie_title(a), movie_title(b), Direction::Ascending),
            AwardSort::Ceremony => by_text(
                a.ceremony.as_deref(),
                b.ceremony.as_deref(),
                Direction::Ascending,
            ),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            AwardSort::YearDesc => "year_desc",
            AwardSort::YearAsc => "year_asc",
            AwardSort::TitleAsc => "title_asc",
            AwardSort::Ceremony => "ceremony",
        }
    }
}

impl FromStr for AwardSort {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_key(AwardsPage::NAME, s, &Self::ALL, |key| {
            <AwardSort as SortKey<AwardEntry>>::label(key)
        })
    }
}

impl fmt::Display for AwardSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(<AwardSort as SortKey<AwardEntry>>::label(self))
    }
}

impl PageConfig for AwardsPage {
    type Item = AwardEntry;
    type Criteria = AwardCriteria;
    type Sort = AwardSort;

    const NAME: &'static str = "awards";

    fn filters(criteria: &AwardCriteria) -> FilterPipeline<AwardEntry> {
        FilterPipeline::new()
            .add_filter(MembershipFilter::new(
                "ceremony",
                ceremony,
                criteria.ceremonies.clone(),
            ))
            .add_filter(MembershipFilter::new(
                "category",
                category,
                criteria.categories.clone(),
            ))
            .add_filter(RangeFilter::new("year", year, criteria.year))
            .add_filter(FlagFilter::new("won", won, criteria.won))
    }

    fn search_fields() -> Vec<TextAccessor<AwardEntry>> {
        vec![movie_title as TextAccessor<AwardEntry>, category_text, nominee]
    }
}
