//! Wire codec between the typed model and the server's JSON.
//!
//! # Design
//! The server falls back to its own defaults for parameters that are absent,
//! and treats an explicit `0`, `false` or `""` as an override. Request types
//! therefore mark optional leaves with `skip_serializing_if` using the
//! predicates below, so a field left at its zero value never reaches the wire.
//! Fields the server always expects carry no predicate.
//!
//! Response types derive `Deserialize` with `#[serde(default)]`: missing keys
//! decode to zero values and unknown keys are ignored. Fields routed through
//! `null_as_default` treat an explicit `null` the same as a missing key. Only
//! malformed JSON or a type mismatch on a present key is an error.
//!
//! Key order follows struct declaration order, so encoding is deterministic.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{DecodeError, EncodeError};

pub fn encode<T: Serialize>(value: &T) -> Result<String, EncodeError> {
    serde_json::to_string(value).map_err(|e| EncodeError::Serialization(e.to_string()))
}

pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, DecodeError> {
    serde_json::from_slice(bytes).map_err(|e| DecodeError {
        message: e.to_string(),
        body: bytes.to_vec(),
    })
}

/// Deserialize `null` as the type's zero value.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub(crate) fn is_zero_i32(value: &i32) -> bool {
    *value == 0
}

pub(crate) fn is_zero_f64(value: &f64) -> bool {
    *value == 0.0
}

pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct Sample {
        always: String,
        #[serde(skip_serializing_if = "is_zero_i32")]
        count: i32,
        #[serde(skip_serializing_if = "is_zero_f64")]
        ratio: f64,
        #[serde(skip_serializing_if = "is_false")]
        flag: bool,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        items: Vec<f64>,
    }

    #[test]
    fn zero_values_are_omitted() {
        let json = encode(&Sample::default()).unwrap();
        assert_eq!(json, r#"{"always":""}"#);
    }

    #[test]
    fn non_zero_values_are_kept_exactly() {
        let sample = Sample {
            always: "x".to_string(),
            count: -3,
            ratio: 0.25,
            flag: true,
            items: vec![104.0, 117.0, 123.0],
        };
        let json = encode(&sample).unwrap();
        assert_eq!(
            json,
            r#"{"always":"x","count":-3,"ratio":0.25,"flag":true,"items":[104.0,117.0,123.0]}"#
        );
    }

    #[test]
    fn encoding_is_stable() {
        let sample = Sample {
            always: "x".to_string(),
            count: 7,
            ..Sample::default()
        };
        assert_eq!(encode(&sample).unwrap(), encode(&sample).unwrap());
    }

    #[test]
    fn decode_ignores_unknown_and_defaults_missing() {
        let sample: Sample = decode(br#"{"count":2,"unexpected":{"nested":true}}"#).unwrap();
        assert_eq!(sample.count, 2);
        assert_eq!(sample.always, "");
        assert!(sample.items.is_empty());
    }

    #[test]
    fn decode_keeps_array_order_and_empty_arrays() {
        let sample: Sample = decode(br#"{"items":[3.0,1.0,2.0]}"#).unwrap();
        assert_eq!(sample.items, vec![3.0, 1.0, 2.0]);
        let sample: Sample = decode(br#"{"items":[]}"#).unwrap();
        assert!(sample.items.is_empty());
    }

    #[test]
    fn decode_rejects_type_mismatch() {
        let err = decode::<Sample>(br#"{"count":"two"}"#).unwrap_err();
        assert_eq!(err.body, br#"{"count":"two"}"#);
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Nullable {
        #[serde(deserialize_with = "null_as_default")]
        items: Vec<f64>,
        #[serde(deserialize_with = "null_as_default")]
        count: i32,
    }

    #[test]
    fn null_as_default_maps_null_to_zero() {
        let n: Nullable = decode(br#"{"items":null,"count":null}"#).unwrap();
        assert!(n.items.is_empty());
        assert_eq!(n.count, 0);
        let n: Nullable = decode(br#"{"items":[1.5],"count":4}"#).unwrap();
        assert_eq!(n.items, vec![1.5]);
        assert_eq!(n.count, 4);
    }

    #[test]
    fn decode_rejects_malformed_json() {
        let err = decode::<Sample>(b"not json").unwrap_err();
        assert_eq!(err.body, b"not json");
    }
}
