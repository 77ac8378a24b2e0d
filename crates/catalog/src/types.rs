//! Core domain records for the critic platform's list views.
//!
//! Every filterable or sortable attribute is an `Option`, because the backend
//! is free to omit fields or send values we cannot interpret. A record with a
//! bad timestamp or an unknown priority still loads; the attribute is simply
//! absent and the pipeline treats it accordingly.
//!
//! Field names are accepted in camelCase (the API's native casing) and in
//! snake_case via serde aliases.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{self, Debug, Display};
use std::hash::Hash;
use std::str::FromStr;

use crate::error::CatalogError;

// =============================================================================
// Type Aliases
// =============================================================================

pub type ReviewId = u64;
pub type HistoryId = u64;
pub type WatchlistId = u64;
pub type AwardId = u64;

// =============================================================================
// Item traits
// =============================================================================

/// A record that can flow through a list pipeline.
///
/// The only hard requirement is a stable identifier; everything else is read
/// through per-page accessor functions.
pub trait ListItem: Clone + Debug + Send + Sync + 'static {
    type Id: Eq + Hash + Clone + Debug + Display + Send + Sync + 'static;

    fn id(&self) -> Self::Id;
}

/// A record carrying a vote counter that can be adjusted optimistically.
pub trait Votable: ListItem {
    /// Current vote count, if the backend sent one.
    fn votes(&self) -> Option<i64>;

    fn set_votes(&mut self, votes: i64);
}

// =============================================================================
// Enums
// =============================================================================

/// Watchlist priority. Ordering is by explicit rank, never by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Ordinal used for sorting: high=0, medium=1, low=2.
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }
}

impl FromStr for Priority {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(CatalogError::InvalidValue {
                field: "priority".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        };
        f.write_str(name)
    }
}

/// Where a watchlist entry stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WatchStatus {
    #[serde(alias = "planToWatch")]
    PlanToWatch,
    Watching,
    Watched,
    Dropped,
}

impl FromStr for WatchStatus {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "plan_to_watch" | "plantowatch" => Ok(WatchStatus::PlanToWatch),
            "watching" => Ok(WatchStatus::Watching),
            "watched" => Ok(WatchStatus::Watched),
            "dropped" => Ok(WatchStatus::Dropped),
            _ => Err(CatalogError::InvalidValue {
                field: "status".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

impl Display for WatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WatchStatus::PlanToWatch => "plan_to_watch",
            WatchStatus::Watching => "watching",
            WatchStatus::Watched => "watched",
            WatchStatus::Dropped => "dropped",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Reviews
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Author {
    #[serde(alias = "display_name")]
    pub display_name: Option<String>,
    pub username: Option<String>,
}

/// A critic or user review of a movie.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    #[serde(alias = "user")]
    pub author: Option<Author>,
    #[serde(alias = "movie_title")]
    pub movie_title: Option<String>,
    #[serde(alias = "content")]
    pub body: Option<String>,
    /// Star rating, 1 to 5
    #[serde(default, deserialize_with = "lenient")]
    pub rating: Option<u8>,
    #[serde(alias = "is_verified", default, deserialize_with = "lenient")]
    pub is_verified: Option<bool>,
    #[serde(alias = "contains_spoilers", default, deserialize_with = "lenient")]
    pub contains_spoilers: Option<bool>,
    #[serde(alias = "helpful_count", default, deserialize_with = "lenient")]
    pub helpful_count: Option<i64>,
    #[serde(alias = "comment_count", default, deserialize_with = "lenient")]
    pub comment_count: Option<u32>,
    #[serde(alias = "created_at", default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl ListItem for Review {
    type Id = ReviewId;

    fn id(&self) -> ReviewId {
        self.id
    }
}

impl Votable for Review {
    fn votes(&self) -> Option<i64> {
        self.helpful_count
    }

    fn set_votes(&mut self, votes: i64) {
        self.helpful_count = Some(votes);
    }
}

// =============================================================================
// Watch history
// =============================================================================

/// One viewing in a user's watch history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: HistoryId,
    #[serde(alias = "movie_title", alias = "title")]
    pub movie_title: Option<String>,
    #[serde(alias = "watched_at", default, deserialize_with = "lenient_timestamp")]
    pub watched_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient")]
    pub rating: Option<u8>,
    #[serde(alias = "release_year", alias = "year", default, deserialize_with = "lenient")]
    pub release_year: Option<i32>,
    #[serde(alias = "is_rewatch", default, deserialize_with = "lenient")]
    pub is_rewatch: Option<bool>,
}

impl ListItem for HistoryEntry {
    type Id = HistoryId;

    fn id(&self) -> HistoryId {
        self.id
    }
}

// =============================================================================
// Watchlist
// =============================================================================

/// A movie queued on a user's watchlist.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistEntry {
    pub id: WatchlistId,
    #[serde(alias = "movie_title", alias = "title")]
    pub movie_title: Option<String>,
    #[serde(alias = "added_at", default, deserialize_with = "lenient_timestamp")]
    pub added_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient")]
    pub priority: Option<Priority>,
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<WatchStatus>,
    #[serde(alias = "release_year", alias = "year", default, deserialize_with = "lenient")]
    pub release_year: Option<i32>,
    pub notes: Option<String>,
}

impl ListItem for WatchlistEntry {
    type Id = WatchlistId;

    fn id(&self) -> WatchlistId {
        self.id
    }
}

// =============================================================================
// Awards
// =============================================================================

/// A nomination or win at an awards ceremony.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwardEntry {
    pub id: AwardId,
    #[serde(alias = "movie_title", alias = "title")]
    pub movie_title: Option<String>,
    pub ceremony: Option<String>,
    pub category: Option<String>,
    /// Person or team nominated, when the category is not "Best Picture"-like
    pub nominee: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub year: Option<i32>,
    #[serde(alias = "is_winner", default, deserialize_with = "lenient")]
    pub won: Option<bool>,
}

impl ListItem for AwardEntry {
    type Id = AwardId;

    fn id(&self) -> AwardId {
        self.id
    }
}

// =============================================================================
// Lenient deserializers
// =============================================================================

/// Decode a value, mapping anything unreadable to `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Accepts RFC 3339 strings, bare `YYYY-MM-DD` dates and unix seconds.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(parse_timestamp(&value))
}

pub(crate) fn parse_timestamp(value: &serde_json::Value) -> Option<DateTime<Utc>> {
    match value {
        serde_json::Value::String(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
                Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?))
            }),
        serde_json::Value::Number(n) => {
            let secs = n.as_i64()?;
            Utc.timestamp_opt(secs, 0).single()
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_priority_rank_is_not_alphabetical() {
        assert!(Priority::High.rank() < Priority::Medium.rank());
        assert!(Priority::Medium.rank() < Priority::Low.rank());
        // alphabetically "high" < "low" < "medium", which is the wrong order
        assert!(Priority::Low.rank() > Priority::Medium.rank());
    }

    #[test]
    fn test_watch_status_from_str_accepts_variants() {
        assert_eq!("plan-to-watch".parse::<WatchStatus>().unwrap(), WatchStatus::PlanToWatch);
        assert_eq!("Watched".parse::<WatchStatus>().unwrap(), WatchStatus::Watched);
        assert!("finished".parse::<WatchStatus>().is_err());
    }

    #[test]
    fn test_review_accepts_both_casings() {
        let camel: Review = serde_json::from_value(json!({
            "id": 1,
            "isVerified": true,
            "helpfulCount": 4,
            "createdAt": "2024-05-01T10:00:00Z"
        }))
        .unwrap();
        let snake: Review = serde_json::from_value(json!({
            "id": 1,
            "is_verified": true,
            "helpful_count": 4,
            "created_at": "2024-05-01T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(camel, snake);
        assert_eq!(camel.is_verified, Some(true));
        assert!(camel.created_at.is_some());
    }

    #[test]
    fn test_malformed_attributes_become_none() {
        let entry: WatchlistEntry = serde_json::from_value(json!({
            "id": 7,
            "priority": "urgent",
            "addedAt": "last tuesday",
            "releaseYear": "nineteen-ninety"
        }))
        .unwrap();

        assert_eq!(entry.id, 7);
        assert_eq!(entry.priority, None);
        assert_eq!(entry.added_at, None);
        assert_eq!(entry.release_year, None);
    }

    #[test]
    fn test_timestamp_formats() {
        assert!(parse_timestamp(&json!("2023-01-02")).is_some());
        assert!(parse_timestamp(&json!(978300760)).is_some());
        assert!(parse_timestamp(&json!(null)).is_none());
        assert!(parse_timestamp(&json!("not a date")).is_none());
    }

    #[test]
    fn test_review_votes() {
        let mut review = Review { id: 3, ..Default::default() };
        assert_eq!(review.votes(), None);
        review.set_votes(12);
        assert_eq!(review.votes(), Some(12));
        assert_eq!(review.id(), 3);
    }
}
