//! Filter keeping items whose attribute falls inside inclusive bounds.

use crate::traits::{Accessor, Filter};
use serde::{Deserialize, Serialize};

/// Inclusive bounds; either side may be open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds<V> {
    pub min: Option<V>,
    pub max: Option<V>,
}

// Derived Default would demand `V: Default`.
impl<V> Default for Bounds<V> {
    fn default() -> Self {
        Self {
            min: None,
            max: None,
        }
    }
}

impl<V: PartialOrd> Bounds<V> {
    pub fn new(min: Option<V>, max: Option<V>) -> Self {
        Self { min, max }
    }

    pub fn is_open(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    pub fn contains(&self, value: &V) -> bool {
        self.min.as_ref().is_none_or(|min| value >= min)
            && self.max.as_ref().is_none_or(|max| value <= max)
    }
}

/// Keeps items with `min <= accessor(item) <= max`.
pub struct RangeFilter<T, V> {
    name: &'static str,
    accessor: Accessor<T, V>,
    bounds: Bounds<V>,
}

impl<T, V: PartialOrd> RangeFilter<T, V> {
    pub fn new(name: &'static str, accessor: Accessor<T, V>, bounds: Bounds<V>) -> Self {
        Self {
            name,
            accessor,
            bounds,
        }
    }
}

impl<T, V> Filter<T> for RangeFilter<T, V>
where
    V: PartialOrd + Send + Sync,
{
    fn name(&self) -> &str {
        self.name
    }

    fn is_active(&self) -> bool {
        !self.bounds.is_open()
    }

    fn matches(&self, item: &T) -> bool {
        if self.bounds.is_open() {
            return true;
        }
        (self.accessor)(item).is_some_and(|value| self.bounds.contains(&value))
    }
}
