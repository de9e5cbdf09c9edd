//! VALUE representation passthrough.
//!
//! A plain observation value is a scalar token. `UNAVAILABLE` is both the
//! wire tag and the MTConnect domain value here, so only the exact sentinel
//! means unavailable regardless of the sentinel policy.

use core::fmt;

use mtc_core::Scalar;
use mtc_streams::Sparse;
use serde::de::{self, DeserializeSeed, Visitor};
use serde::{Serialize, Serializer};

use super::UNAVAILABLE;
use super::scalar::WireScalar;

pub struct ValueEntry<'a>(pub &'a Sparse<Scalar>);

impl Serialize for ValueEntry<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.0 {
            Sparse::Unavailable => serializer.serialize_str(UNAVAILABLE),
            Sparse::Present(scalar) => WireScalar(scalar).serialize(serializer),
        }
    }
}

#[derive(Clone, Copy)]
pub struct ValueSeed;

impl<'de> DeserializeSeed<'de> for ValueSeed {
    type Value = Sparse<Scalar>;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Sparse<Scalar>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a scalar value or \"UNAVAILABLE\"")
    }

    fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Sparse::Present(Scalar::Number(v)))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Sparse::Present(Scalar::Number(v as f64)))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Sparse::Present(Scalar::Number(v as f64)))
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        if v == UNAVAILABLE {
            Ok(Sparse::Unavailable)
        } else {
            Ok(Sparse::Present(Scalar::Text(v.to_owned())))
        }
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Sparse::Present(Scalar::Null))
    }
}
