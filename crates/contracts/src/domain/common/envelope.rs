//! Normalization of list responses.
//!
//! Endpoints are inconsistent about how a collection is wrapped:
//!
//! ```text
//! [ {...}, {...} ]                  bare array
//! { "staff": [ {...} ] }            keyed by resource name
//! { "data":  [ {...} ] }            generic data wrapper
//! ```
//!
//! All three normalize to the contained array. Anything else is a malformed
//! response; a `{ "success": false, "message": "..." }` body carries the
//! server's own explanation through to the caller.

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum EnvelopeError {
    #[error("Server reported an error: {0}")]
    Server(String),
    #[error("Unexpected response shape for '{resource}'")]
    Malformed { resource: String },
    #[error("Failed to decode '{resource}' item #{index}: {reason}")]
    Item {
        resource: String,
        index: usize,
        reason: String,
    },
}

/// Extract the collection from any accepted shape without decoding items.
pub fn unwrap_list(body: Value, resource_key: &str) -> Result<Vec<Value>, EnvelopeError> {
    match body {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => {
            if let Some(Value::Array(items)) = map.remove(resource_key) {
                return Ok(items);
            }
            if let Some(Value::Array(items)) = map.remove("data") {
                return Ok(items);
            }
            // An empty collection is sometimes encoded as `{ "data": null }`.
            if matches!(map.get("data"), Some(Value::Null))
                || matches!(map.get(resource_key), Some(Value::Null))
            {
                return Ok(Vec::new());
            }
            let message = ["message", "error"]
                .iter()
                .find_map(|k| map.get(*k).and_then(Value::as_str))
                .map(str::to_string);
            match message {
                Some(m) => Err(EnvelopeError::Server(m)),
                None => Err(EnvelopeError::Malformed {
                    resource: resource_key.to_string(),
                }),
            }
        }
        _ => Err(EnvelopeError::Malformed {
            resource: resource_key.to_string(),
        }),
    }
}

/// Extract and decode the collection.
pub fn normalize_list<T: DeserializeOwned>(
    body: Value,
    resource_key: &str,
) -> Result<Vec<T>, EnvelopeError> {
    unwrap_list(body, resource_key)?
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).map_err(|e| EnvelopeError::Item {
                resource: resource_key.to_string(),
                index,
                reason: e.to_string(),
            })
        })
        .collect()
}

/// Check a mutation response. PHP answers 200 with `{"success": false}` on
/// rejected writes, so HTTP status alone is not enough.
pub fn check_mutation(body: &Value) -> Result<(), EnvelopeError> {
    let Some(map) = body.as_object() else {
        return Ok(());
    };
    let failed = match map.get("success").or_else(|| map.get("status")) {
        Some(Value::Bool(b)) => !b,
        Some(Value::String(s)) => matches!(s.as_str(), "error" | "fail" | "failed" | "false"),
        Some(Value::Number(n)) => n.as_i64() == Some(0),
        _ => false,
    };
    if failed {
        let message = ["message", "error"]
            .iter()
            .find_map(|k| map.get(*k).and_then(Value::as_str))
            .unwrap_or("Operation failed")
            .to_string();
        return Err(EnvelopeError::Server(message));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Thing {
        id: i64,
    }

    #[test]
    fn test_all_accepted_shapes_normalize_to_contained_array() {
        let items = json!([{"id": 1}, {"id": 2}]);
        let expected = vec![Thing { id: 1 }, Thing { id: 2 }];

        let bare: Vec<Thing> = normalize_list(items.clone(), "staff").unwrap();
        let keyed: Vec<Thing> = normalize_list(json!({ "staff": items.clone() }), "staff").unwrap();
        let data: Vec<Thing> = normalize_list(json!({ "data": items }), "staff").unwrap();

        assert_eq!(bare, expected);
        assert_eq!(keyed, expected);
        assert_eq!(data, expected);
    }

    #[test]
    fn test_null_data_is_empty() {
        let out: Vec<Thing> = normalize_list(json!({"success": true, "data": null}), "x").unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_server_message_surfaces() {
        let err = normalize_list::<Thing>(
            json!({"success": false, "message": "Invalid user"}),
            "expenses",
        )
        .unwrap_err();
        assert_eq!(err, EnvelopeError::Server("Invalid user".into()));
    }

    #[test]
    fn test_malformed_shapes() {
        assert!(matches!(
            normalize_list::<Thing>(json!({"rows": []}), "staff"),
            Err(EnvelopeError::Malformed { .. })
        ));
        assert!(matches!(
            normalize_list::<Thing>(json!("oops"), "staff"),
            Err(EnvelopeError::Malformed { .. })
        ));
    }

    #[test]
    fn test_bad_item_reports_index() {
        let err = normalize_list::<Thing>(json!([{"id": 1}, {"name": "x"}]), "staff").unwrap_err();
        assert!(matches!(err, EnvelopeError::Item { index: 1, .. }));
    }

    #[test]
    fn test_check_mutation() {
        assert!(check_mutation(&json!({"success": true, "id": 4})).is_ok());
        assert!(check_mutation(&json!(null)).is_ok());
        assert_eq!(
            check_mutation(&json!({"success": false, "message": "Duplicate"})),
            Err(EnvelopeError::Server("Duplicate".into()))
        );
        assert!(check_mutation(&json!({"status": "error"})).is_err());
    }
}
