//! Parser for list payloads.
//!
//! The backend answers list endpoints in one of two shapes:
//! - a bare JSON array of items
//! - an envelope object `{ "items": [...], "total": n }`, where some
//!   endpoints use `data` or `results` instead of `items`
//!
//! Both are accepted here so the pipeline only ever sees `Vec<T>`.

use crate::error::{CatalogError, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Keys under which an envelope may carry its items, checked in order.
const ENVELOPE_KEYS: [&str; 3] = ["items", "data", "results"];

/// Parsed list payload together with the total the server reported, if any.
#[derive(Debug, Clone)]
pub struct ListPayload<T> {
    pub items: Vec<T>,
    pub total: Option<u64>,
}

/// Parse raw bytes into a list of items.
pub fn parse_items<T: DeserializeOwned>(bytes: &[u8]) -> Result<Vec<T>> {
    parse_payload(bytes).map(|payload| payload.items)
}

/// Parse raw bytes into a [`ListPayload`], keeping the envelope total.
pub fn parse_payload<T: DeserializeOwned>(bytes: &[u8]) -> Result<ListPayload<T>> {
    let value: Value = serde_json::from_slice(bytes).map_err(|source| CatalogError::Json {
        context: "list payload".to_string(),
        source,
    })?;
    payload_from_value(value)
}

/// Split a decoded JSON value into items and optional total.
pub fn payload_from_value<T: DeserializeOwned>(value: Value) -> Result<ListPayload<T>> {
    let (array, total) = match value {
        Value::Array(array) => (array, None),
        Value::Object(mut map) => {
            let total = map.get("total").and_then(Value::as_u64);
            let array = ENVELOPE_KEYS
                .iter()
                .find_map(|key| match map.remove(*key) {
                    Some(Value::Array(array)) => Some(array),
                    _ => None,
                })
                .ok_or_else(|| CatalogError::UnexpectedShape {
                    expected: "array or {items, total} envelope".to_string(),
                    found: "object without an item array".to_string(),
                })?;
            (array, total)
        }
        other => {
            return Err(CatalogError::UnexpectedShape {
                expected: "array or {items, total} envelope".to_string(),
                found: json_kind(&other).to_string(),
            });
        }
    };

    let items = array
        .into_iter()
        .enumerate()
        .map(|(idx, item)| {
            serde_json::from_value(item).map_err(|source| CatalogError::Json {
                context: format!("item {}", idx),
                source,
            })
        })
        .collect::<Result<Vec<T>>>()?;

    debug!("Parsed {} items (reported total: {:?})", items.len(), total);
    Ok(ListPayload { items, total })
}

/// Load a list fixture from disk.
pub fn load_items_from_file<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Err(CatalogError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let bytes = std::fs::read(path)?;
    parse_items(&bytes)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AwardEntry, Review};
    use std::io::Write;

    #[test]
    fn test_parse_bare_array() {
        let items: Vec<Review> = parse_items(br#"[{"id": 1}, {"id": 2}]"#).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].id, 2);
    }

    #[test]
    fn test_parse_envelope_keeps_total() {
        let payload: ListPayload<Review> =
            parse_payload(br#"{"items": [{"id": 9}], "total": 40}"#).unwrap();
        assert_eq!(payload.items.len(), 1);
        assert_eq!(payload.total, Some(40));
    }

    #[test]
    fn test_parse_alternate_envelope_key() {
        let items: Vec<AwardEntry> =
            parse_items(br#"{"results": [{"id": 1, "ceremony": "Oscars"}]}"#).unwrap();
        assert_eq!(items[0].ceremony.as_deref(), Some("Oscars"));
    }

    #[test]
    fn test_parse_rejects_scalar() {
        let err = parse_items::<Review>(b"42").unwrap_err();
        assert!(matches!(err, CatalogError::UnexpectedShape { .. }));
    }

    #[test]
    fn test_parse_rejects_invalid_json() {
        let err = parse_items::<Review>(b"{not json").unwrap_err();
        assert!(matches!(err, CatalogError::Json { .. }));
    }

    #[test]
    fn test_parse_item_with_bad_id_is_an_error_with_index() {
        let err = parse_items::<Review>(br#"[{"id": 1}, {"id": "x"}]"#).unwrap_err();
        assert!(err.to_string().contains("item 1"));
    }

    #[test]
    fn test_parse_item_without_id_is_an_error_with_index() {
        let err = parse_items::<Review>(br#"[{"id": 1, "rating": 5}, {"rating": 4}]"#).unwrap_err();
        assert!(matches!(err, CatalogError::Json { .. }));
        assert!(err.to_string().contains("item 1"));

        let err = parse_items::<AwardEntry>(br#"{"items": [{"ceremony": "Oscars"}]}"#).unwrap_err();
        assert!(err.to_string().contains("item 0"));
    }

    #[test]
    fn test_parse_empty_array() {
        let items: Vec<Review> = parse_items(b"[]").unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_load_items_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"id": 5, "rating": 4}}]"#).unwrap();

        let items: Vec<Review> = load_items_from_file(file.path()).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].rating, Some(4));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_items_from_file::<Review>(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, CatalogError::FileNotFound { .. }));
    }
}
