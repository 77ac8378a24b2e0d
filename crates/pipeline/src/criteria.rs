//! Criterion values shared by every page's filter settings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An equality criterion, or the wildcard that disables it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Criterion<V> {
    All,
    Only(V),
}

// Derived Default would demand `V: Default`.
impl<V> Default for Criterion<V> {
    fn default() -> Self {
        Criterion::All
    }
}

impl<V> Criterion<V> {
    pub fn is_all(&self) -> bool {
        matches!(self, Criterion::All)
    }

    pub fn value(&self) -> Option<&V> {
        match self {
            Criterion::All => None,
            Criterion::Only(v) => Some(v),
        }
    }
}

impl<V> From<Option<V>> for Criterion<V> {
    fn from(value: Option<V>) -> Self {
        value.map_or(Criterion::All, Criterion::Only)
    }
}

/// Three-way switch for boolean attributes.
///
/// `Any` is distinct from both `Yes` and `No`: it shows everything,
/// including items where the flag is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriState {
    #[default]
    Any,
    Yes,
    No,
}

impl TriState {
    pub fn wanted(self) -> Option<bool> {
        match self {
            TriState::Any => None,
            TriState::Yes => Some(true),
            TriState::No => Some(false),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTriStateError(String);

impl fmt::Display for ParseTriStateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected one of any/yes/no, got '{}'", self.0)
    }
}

impl std::error::Error for ParseTriStateError {}

impl FromStr for TriState {
    type Err = ParseTriStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "any" | "all" => Ok(TriState::Any),
            "yes" | "true" | "only" => Ok(TriState::Yes),
            "no" | "false" | "none" => Ok(TriState::No),
            _ => Err(ParseTriStateError(s.to_string())),
        }
    }
}
