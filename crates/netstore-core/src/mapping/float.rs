//! Lossless storage of non-finite floats.
//!
//! SQLite stores a bound NaN as NULL and JSON has no literal for NaN or
//! infinity, yet unset electrical values are commonly NaN. Non-finite values
//! are therefore written as text in both places:
//!
//! ```text
//!   NaN  ──► "NaN"        +∞ ──► "Infinity"        -∞ ──► "-Infinity"
//! ```
//!
//! Finite values keep their numeric form. JSON fields opt in with
//! `#[serde(with = "float")]` or `#[serde(with = "float::option")]`.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serializer};

const NAN: &str = "NaN";
const INFINITY: &str = "Infinity";
const NEG_INFINITY: &str = "-Infinity";

/// Text form of a non-finite value, `None` for finite ones.
pub fn non_finite_text(value: f64) -> Option<&'static str> {
    if value.is_nan() {
        Some(NAN)
    } else if value == f64::INFINITY {
        Some(INFINITY)
    } else if value == f64::NEG_INFINITY {
        Some(NEG_INFINITY)
    } else {
        None
    }
}

/// Parses the text written by [`non_finite_text`].
pub fn parse_non_finite(text: &str) -> Option<f64> {
    match text {
        NAN => Some(f64::NAN),
        INFINITY => Some(f64::INFINITY),
        NEG_INFINITY => Some(f64::NEG_INFINITY),
        _ => None,
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Wire {
    Number(f64),
    Text(String),
}

impl Wire {
    fn into_f64<E: de::Error>(self) -> Result<f64, E> {
        match self {
            Wire::Number(value) => Ok(value),
            Wire::Text(text) => parse_non_finite(&text).ok_or_else(|| {
                de::Error::invalid_value(de::Unexpected::Str(&text), &"a number, NaN or Infinity")
            }),
        }
    }
}

pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    match non_finite_text(*value) {
        Some(text) => serializer.serialize_str(text),
        None => serializer.serialize_f64(*value),
    }
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Wire::deserialize(deserializer)?.into_f64()
}

/// Same encoding for `Option<f64>`; `None` stays JSON `null`.
pub mod option {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => super::serialize(value, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<f64>, D::Error> {
        Option::<Wire>::deserialize(deserializer)?
            .map(Wire::into_f64)
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Debug, Serialize, Deserialize)]
    struct Sample {
        #[serde(with = "super")]
        value: f64,
        #[serde(default, with = "super::option")]
        maybe: Option<f64>,
    }

    #[test]
    fn test_non_finite_written_as_text() {
        let json = serde_json::to_value(Sample {
            value: f64::NAN,
            maybe: Some(f64::NEG_INFINITY),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"value": "NaN", "maybe": "-Infinity"}));

        let back: Sample = serde_json::from_value(json).unwrap();
        assert!(back.value.is_nan());
        assert_eq!(back.maybe, Some(f64::NEG_INFINITY));
    }

    #[test]
    fn test_finite_stays_numeric() {
        let json = serde_json::to_value(Sample {
            value: 1.5,
            maybe: None,
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"value": 1.5, "maybe": null}));

        let back: Sample = serde_json::from_str(r#"{"value": 2}"#).unwrap();
        assert_eq!(back.value, 2.0);
        assert_eq!(back.maybe, None);
    }

    #[test]
    fn test_unknown_text_rejected() {
        assert!(serde_json::from_str::<Sample>(r#"{"value": "nan"}"#).is_err());
        assert_eq!(parse_non_finite("Infinity"), Some(f64::INFINITY));
        assert_eq!(non_finite_text(0.0), None);
    }
}
