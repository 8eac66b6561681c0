//! Lenient field deserializers for server payloads
//!
//! The remote service is loose about field types: counts arrive as numbers or
//! numeric strings, rates as `75.5` or `"75.50"`, and any field may be `null`.
//! These helpers accept whatever JSON value is present and fall back to the
//! type's default instead of failing the enclosing row.
//!
//! # Usage
//! ```rust
//! use serde::Deserialize;
//! use studyreport_domain::utils::serde::{lenient_f64, lenient_string};
//!
//! #[derive(Deserialize)]
//! struct Row {
//!     #[serde(default, deserialize_with = "lenient_string")]
//!     name: String,
//!     #[serde(default, deserialize_with = "lenient_f64")]
//!     rate: f64,
//! }
//!
//! let row: Row = serde_json::from_str(r#"{ "name": null, "rate": "75.50" }"#).unwrap();
//! assert_eq!(row.name, "");
//! assert_eq!(row.rate, 75.5);
//! ```

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::types::value_text;

/// Text of any scalar; `null` reads as `""`.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_text(&Value::deserialize(deserializer)?))
}

/// Integer from a number or numeric string; anything else reads as `0`.
pub fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let parsed = match &value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| s.parse::<f64>().ok().map(|f| f as i64))
        }
        _ => None,
    };
    Ok(parsed.unwrap_or_default())
}

/// Float from a number or numeric string (a trailing `%` is ignored);
/// anything else reads as `0.0`.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let parsed = match &value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').trim_end().parse::<f64>().ok(),
        _ => None,
    };
    Ok(parsed.filter(|f| f.is_finite()).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Default, PartialEq, Deserialize)]
    #[serde(default)]
    struct Row {
        #[serde(deserialize_with = "lenient_string")]
        name: String,
        #[serde(deserialize_with = "lenient_i64")]
        count: i64,
        #[serde(deserialize_with = "lenient_f64")]
        rate: f64,
    }

    fn row(value: Value) -> Row {
        serde_json::from_value(value).expect("lenient row should always decode")
    }

    #[test]
    fn test_nulls_read_as_defaults() {
        assert_eq!(row(json!({ "name": null, "count": null, "rate": null })), Row::default());
    }

    #[test]
    fn test_numeric_strings_are_parsed() {
        let parsed = row(json!({ "name": 7, "count": " 40 ", "rate": "75.50%" }));
        assert_eq!(parsed, Row { name: "7".into(), count: 40, rate: 75.5 });

        assert_eq!(row(json!({ "count": "12.0" })).count, 12);
        assert_eq!(row(json!({ "count": 3.9 })).count, 3);
    }

    #[test]
    fn test_unusable_values_fall_back() {
        let parsed = row(json!({ "count": "n/a", "rate": [1, 2], "name": { "a": 1 } }));
        assert_eq!(parsed.count, 0);
        assert_eq!(parsed.rate, 0.0);
        assert_eq!(parsed.name, r#"{"a":1}"#);
    }
}
