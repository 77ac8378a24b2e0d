//! Error returned when a sort key name is not recognised.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {page} sort key '{value}' (expected one of: {expected})")]
pub struct ParseKeyError {
    pub page: &'static str,
    pub value: String,
    pub expected: String,
}

/// Resolve `value` against a page's sort keys by their labels.
pub(crate) fn parse_key<K: Copy>(
    page: &'static str,
    value: &str,
    keys: &[K],
    label: fn(&K) -> &'static str,
) -> Result<K, ParseKeyError> {
    let wanted = value.trim().to_ascii_lowercase().replace('-', "_");
    keys.iter()
        .find(|key| label(key) == wanted)
        .copied()
        .ok_or_else(|| ParseKeyError {
            page,
            value: value.to_string(),
            expected: keys.iter().map(label).collect::<Vec<_>>().join(", "),
        })
}
