//! Numeric-or-string scalar tokens.

use core::fmt;

use mtc_core::Scalar;
use serde::de::{self, DeserializeSeed, Visitor};
use serde::{Serialize, Serializer, ser};

/// Writes a classified scalar: numbers as JSON numbers, text as strings,
/// absent values as `null`. Non-finite numbers have no JSON form and fail.
pub struct WireScalar<'a>(pub &'a Scalar);

impl Serialize for WireScalar<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.0 {
            Scalar::Number(v) if !v.is_finite() => {
                Err(ser::Error::custom(format_args!("non-finite number {v}")))
            }
            Scalar::Number(v) => serializer.serialize_f64(*v),
            Scalar::Text(s) => serializer.serialize_str(s),
            Scalar::Null => serializer.serialize_unit(),
        }
    }
}

/// Reads a scalar token, keeping the type it was received with.
///
/// Strings are never re-classified: `"12"` stays text.
#[derive(Clone, Copy)]
pub struct ScalarSeed;

impl<'de> DeserializeSeed<'de> for ScalarSeed {
    type Value = Scalar;

    fn deserialize<D>(self, deserializer: D) -> Result<Scalar, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_any(ScalarVisitor)
    }
}

struct ScalarVisitor;

impl<'de> Visitor<'de> for ScalarVisitor {
    type Value = Scalar;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a number, a string or null")
    }

    fn visit_f64<E>(self, v: f64) -> Result<Scalar, E>
    where
        E: de::Error,
    {
        Ok(Scalar::Number(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Scalar, E>
    where
        E: de::Error,
    {
        Ok(Scalar::Number(v as f64))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Scalar, E>
    where
        E: de::Error,
    {
        Ok(Scalar::Number(v as f64))
    }

    fn visit_str<E>(self, v: &str) -> Result<Scalar, E>
    where
        E: de::Error,
    {
        Ok(Scalar::Text(v.to_owned()))
    }

    fn visit_string<E>(self, v: String) -> Result<Scalar, E>
    where
        E: de::Error,
    {
        Ok(Scalar::Text(v))
    }

    fn visit_unit<E>(self) -> Result<Scalar, E>
    where
        E: de::Error,
    {
        Ok(Scalar::Null)
    }

    fn visit_none<E>(self) -> Result<Scalar, E>
    where
        E: de::Error,
    {
        Ok(Scalar::Null)
    }
}
