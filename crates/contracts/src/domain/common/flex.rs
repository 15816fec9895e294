//! Tolerant decoders for PHP-produced JSON.
//!
//! The PHP endpoints serialize MySQL rows as-is, so an id can arrive as `7`
//! or `"7"`, an amount as `150.5` or `"150.50"`, and a flag as `true`, `1`
//! or `"1"`. Empty strings and `null` in optional foreign keys mean "unset".

use serde::de::{self, Deserializer};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum Raw {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
}

fn raw_to_i64<E: de::Error>(raw: Raw) -> Result<Option<i64>, E> {
    match raw {
        Raw::Int(v) => Ok(Some(v)),
        Raw::Float(v) if v.fract() == 0.0 => Ok(Some(v as i64)),
        Raw::Float(v) => Err(E::custom(format!("expected integer, got {v}"))),
        Raw::Bool(_) => Err(E::custom("expected integer, got boolean")),
        Raw::Str(s) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            s.parse::<i64>()
                .map(Some)
                .map_err(|_| E::custom(format!("expected integer, got \"{s}\"")))
        }
    }
}

fn raw_to_f64<E: de::Error>(raw: Raw) -> Result<Option<f64>, E> {
    match raw {
        Raw::Int(v) => Ok(Some(v as f64)),
        Raw::Float(v) => Ok(Some(v)),
        Raw::Bool(_) => Err(E::custom("expected number, got boolean")),
        Raw::Str(s) => {
            let s = s.trim().replace(',', "");
            if s.is_empty() {
                return Ok(None);
            }
            s.parse::<f64>()
                .map(Some)
                .map_err(|_| E::custom(format!("expected number, got \"{s}\"")))
        }
    }
}

/// Required integer (id, staff_id, ...).
pub fn id<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    raw_to_i64(Raw::deserialize(d)?)?.ok_or_else(|| de::Error::custom("empty id"))
}

/// Optional integer; `null`, missing, `""` and `0` all decode to `None`.
pub fn opt_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    let raw: Option<Raw> = Option::deserialize(d)?;
    match raw {
        None => Ok(None),
        Some(r) => Ok(raw_to_i64(r)?.filter(|v| *v != 0)),
    }
}

/// Required number; empty string decodes to `0.0`.
pub fn number<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(raw_to_f64(Raw::deserialize(d)?)?.unwrap_or(0.0))
}

/// Optional number.
pub fn opt_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    let raw: Option<Raw> = Option::deserialize(d)?;
    match raw {
        None => Ok(None),
        Some(r) => raw_to_f64(r),
    }
}

/// Boolean from `true`/`false`, `1`/`0`, `"1"`/`"0"`, `"yes"`/`"no"`.
pub fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    let raw: Option<Raw> = Option::deserialize(d)?;
    Ok(match raw {
        None => false,
        Some(Raw::Bool(b)) => b,
        Some(Raw::Int(v)) => v != 0,
        Some(Raw::Float(v)) => v != 0.0,
        Some(Raw::Str(s)) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "y"
        ),
    })
}

/// Optional free text; blank strings decode to `None`.
pub fn opt_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let raw: Option<Raw> = Option::deserialize(d)?;
    Ok(match raw {
        None => None,
        Some(Raw::Str(s)) if s.trim().is_empty() => None,
        Some(Raw::Str(s)) => Some(s),
        Some(Raw::Int(v)) => Some(v.to_string()),
        Some(Raw::Float(v)) => Some(v.to_string()),
        Some(Raw::Bool(b)) => Some(b.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Row {
        #[serde(deserialize_with = "super::id")]
        id: i64,
        #[serde(default, deserialize_with = "super::opt_id")]
        parent_id: Option<i64>,
        #[serde(deserialize_with = "super::number")]
        amount: f64,
        #[serde(default, deserialize_with = "super::flag")]
        active: bool,
        #[serde(default, deserialize_with = "super::opt_text")]
        note: Option<String>,
    }

    #[test]
    fn test_numbers_from_strings() {
        let row: Row = serde_json::from_str(
            r#"{"id":"12","parent_id":"3","amount":"1,250.50","active":"1","note":"  "}"#,
        )
        .unwrap();
        assert_eq!(row.id, 12);
        assert_eq!(row.parent_id, Some(3));
        assert_eq!(row.amount, 1250.5);
        assert!(row.active);
        assert_eq!(row.note, None);
    }

    #[test]
    fn test_empty_foreign_keys() {
        let row: Row =
            serde_json::from_str(r#"{"id":5,"parent_id":"","amount":10,"active":0}"#).unwrap();
        assert_eq!(row.parent_id, None);
        assert!(!row.active);

        let row: Row = serde_json::from_str(r#"{"id":5,"parent_id":null,"amount":1}"#).unwrap();
        assert_eq!(row.parent_id, None);

        let row: Row = serde_json::from_str(r#"{"id":5,"parent_id":0,"amount":1}"#).unwrap();
        assert_eq!(row.parent_id, None);
    }

    #[test]
    fn test_rejects_garbage_id() {
        let res: Result<Row, _> = serde_json::from_str(r#"{"id":"abc","amount":1}"#);
        assert!(res.is_err());
    }
}
