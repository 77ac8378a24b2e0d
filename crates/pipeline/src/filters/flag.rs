//! Three-way filter for boolean attributes.
//!
//! "Verified only", "unverified only" and "show all" are three distinct
//! states, so this takes a [`TriState`] rather than a `bool`.

use crate::criteria::TriState;
use crate::traits::{Accessor, Filter};

/// Keeps items whose flag matches the wanted state.
pub struct FlagFilter<T> {
    name: &'static str,
    accessor: Accessor<T, bool>,
    state: TriState,
}

impl<T> FlagFilter<T> {
    pub fn new(name: &'static str, accessor: Accessor<T, bool>, state: TriState) -> Self {
        Self {
            name,
            accessor,
            state,
        }
    }
}

impl<T> Filter<T> for FlagFilter<T> {
    fn name(&self) -> &str {
        self.name
    }

    fn is_active(&self) -> bool {
        self.state != TriState::Any
    }

    fn matches(&self, item: &T) -> bool {
        match self.state.wanted() {
            None => true,
            Some(wanted) => (self.accessor)(item) == Some(wanted),
        }
    }
}
