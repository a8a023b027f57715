use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;

use crate::Patch;

/// Integer field that also accepts a float with no fractional part, so
/// `10.0` decodes as `10` while `10.5` is still a type error.
struct WholeNumber(i64);

impl<'de> Deserialize<'de> for WholeNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(WholeNumberVisitor)
    }
}

struct WholeNumberVisitor;

impl<'de> Visitor<'de> for WholeNumberVisitor {
    type Value = WholeNumber;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(WholeNumber(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        i64::try_from(value)
            .map(WholeNumber)
            .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(value), &self))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
        // i64::MAX as f64 rounds up to 2^63, hence the strict upper bound.
        if value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64 {
            Ok(WholeNumber(value as i64))
        } else {
            Err(E::invalid_value(de::Unexpected::Float(value), &self))
        }
    }
}

pub(crate) fn whole_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    WholeNumber::deserialize(deserializer).map(|n| n.0)
}

pub(crate) fn whole_number_patch<'de, D>(deserializer: D) -> Result<Patch<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Patch::<WholeNumber>::deserialize(deserializer).map(|patch| patch.map(|n| n.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Body {
        #[serde(deserialize_with = "whole_number")]
        quantity: i64,
        #[serde(default, deserialize_with = "whole_number_patch")]
        update: Patch<i64>,
    }

    #[test]
    fn integral_floats_decode_as_integers() {
        let body: Body = serde_json::from_str(r#"{"quantity": 10.0, "update": -3.0}"#).unwrap();
        assert_eq!(body.quantity, 10);
        assert_eq!(body.update, Patch::Value(-3));

        let body: Body = serde_json::from_str(r#"{"quantity": 7, "update": null}"#).unwrap();
        assert_eq!(body.quantity, 7);
        assert_eq!(body.update, Patch::Null);

        let body: Body = serde_json::from_str(r#"{"quantity": 0}"#).unwrap();
        assert_eq!(body.update, Patch::Absent);
    }

    #[test]
    fn fractions_and_other_types_are_rejected() {
        assert!(serde_json::from_str::<Body>(r#"{"quantity": 10.5}"#).is_err());
        assert!(serde_json::from_str::<Body>(r#"{"quantity": "10"}"#).is_err());
        assert!(serde_json::from_str::<Body>(r#"{"quantity": 1e300}"#).is_err());
        assert!(serde_json::from_str::<Body>(r#"{"quantity": 18446744073709551615}"#).is_err());
    }
}
