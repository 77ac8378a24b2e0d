//! Sort stage: comparator helpers and the stable copy-then-sort.
//!
//! Each page defines a closed enum of sort keys and implements [`SortKey`]
//! for it. Because the enum is exhaustive, an unknown key cannot reach this
//! module; it is rejected when a string is parsed into the enum.

use std::cmp::Ordering;
use std::fmt::Debug;

/// A page's sort order, resolving to a comparator over two items.
pub trait SortKey<T>: Copy + Debug + Send + Sync + 'static {
    fn compare(&self, a: &T, b: &T) -> Ordering;

    /// Stable name used in logs and on the command line.
    fn label(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Ascending => ordering,
            Direction::Descending => ordering.reverse(),
        }
    }
}

/// Return a sorted copy; the caller's slice is untouched.
pub fn sort_items<T: Clone, K: SortKey<T>>(items: &[T], key: K) -> Vec<T> {
    sort_owned(items.to_vec(), key)
}

/// Sort an owned list. `sort_by` is stable, so ties keep their input order.
pub fn sort_owned<T, K: SortKey<T>>(mut items: Vec<T>, key: K) -> Vec<T> {
    items.sort_by(|a, b| key.compare(a, b));
    items
}

/// Compare optional timestamps (or any ordered key).
///
/// A missing value sorts before every present one when ascending, so it
/// ends up last for "newest first".
pub fn by_timestamp<V: Ord>(a: Option<V>, b: Option<V>, direction: Direction) -> Ordering {
    direction.apply(a.cmp(&b))
}

/// Compare optional numbers, treating a missing value as zero.
pub fn by_number(a: Option<f64>, b: Option<f64>, direction: Direction) -> Ordering {
    direction.apply(a.unwrap_or(0.0).total_cmp(&b.unwrap_or(0.0)))
}

/// Compare optional text for alphabetical order.
///
/// Case is folded first so "alien" and "Aliens" sit together; the raw
/// strings break the tie so the order stays deterministic. Missing text
/// compares as the empty string.
pub fn by_text(a: Option<&str>, b: Option<&str>, direction: Direction) -> Ordering {
    let a = a.unwrap_or("");
    let b = b.unwrap_or("");
    let folded = a.to_lowercase().cmp(&b.to_lowercase());
    direction.apply(folded.then_with(|| a.cmp(b)))
}

/// Compare by an explicit ordinal rank, lowest rank first.
///
/// Items without a rank go after every ranked item.
pub fn by_rank(a: Option<u8>, b: Option<u8>) -> Ordering {
    a.unwrap_or(u8::MAX).cmp(&b.unwrap_or(u8::MAX))
}
