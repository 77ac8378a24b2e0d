//! Filter keeping items whose attribute is in a selected set.
//!
//! An empty selection means "no restriction", which is what a row of
//! unchecked ceremony checkboxes should mean to a user.

use crate::traits::{Accessor, Filter};
use std::collections::HashSet;
use std::hash::Hash;

/// Keeps items whose attribute is one of the selected values.
///
/// ## Algorithm
/// 1. Empty selection: every item passes, even ones missing the attribute
/// 2. Otherwise the attribute must be present and contained in the set
pub struct MembershipFilter<T, V> {
    name: &'static str,
    accessor: Accessor<T, V>,
    selected: HashSet<V>,
}

impl<T, V: Eq + Hash> MembershipFilter<T, V> {
    pub fn new(name: &'static str, accessor: Accessor<T, V>, selected: HashSet<V>) -> Self {
        Self {
            name,
            accessor,
            selected,
        }
    }
}

impl<T, V> Filter<T> for MembershipFilter<T, V>
where
    V: Eq + Hash + Send + Sync,
{
    fn name(&self) -> &str {
        self.name
    }

    fn is_active(&self) -> bool {
        !self.selected.is_empty()
    }

    fn matches(&self, item: &T) -> bool {
        if self.selected.is_empty() {
            return true;
        }
        (self.accessor)(item).is_some_and(|value| self.selected.contains(&value))
    }
}
