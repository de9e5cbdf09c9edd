//! DATA_SET payloads: `"UNAVAILABLE"` or an object of scalar entries.

use core::fmt;

use mtc_streams::{DataSet, Sparse};
use serde::de::{self, DeserializeSeed, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::scalar::{ScalarSeed, WireScalar};
use super::{SentinelPolicy, UNAVAILABLE};

pub struct DataSetEntries<'a>(pub &'a Sparse<DataSet>);

impl Serialize for DataSetEntries<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.0 {
            Sparse::Unavailable => serializer.serialize_str(UNAVAILABLE),
            Sparse::Present(set) => EntryMap(set).serialize(serializer),
        }
    }
}

/// Present data set body. Tables reuse it for their rows.
pub(super) struct EntryMap<'a>(pub &'a DataSet);

impl Serialize for EntryMap<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in self.0.iter() {
            map.serialize_entry(key, &WireScalar(value))?;
        }
        map.end()
    }
}

#[derive(Clone, Copy, Default)]
pub struct DataSetSeed(pub SentinelPolicy);

impl<'de> DeserializeSeed<'de> for DataSetSeed {
    type Value = Sparse<DataSet>;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_any(DataSetVisitor { policy: self.0 })
    }
}

struct DataSetVisitor {
    policy: SentinelPolicy,
}

impl<'de> Visitor<'de> for DataSetVisitor {
    type Value = Sparse<DataSet>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an object of data set entries or \"UNAVAILABLE\"")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        self.policy.check(v, &self)?;
        Ok(Sparse::Unavailable)
    }

    fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        read_entries(map).map(Sparse::Present)
    }
}

/// Collects scalar members in document order. Repeated keys keep the first value.
pub(super) fn read_entries<'de, A>(mut map: A) -> Result<DataSet, A::Error>
where
    A: MapAccess<'de>,
{
    let mut set = DataSet::new();
    while let Some(key) = map.next_key::<String>()? {
        let value = map.next_value_seed(ScalarSeed)?;
        set.insert_first(key, value);
    }
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::wire;
    use mtc_core::Scalar;
    use serde_json::json;

    fn decode(value: serde_json::Value, policy: SentinelPolicy) -> Result<Sparse<DataSet>, serde_json::Error> {
        DataSetSeed(policy).deserialize(&value)
    }

    #[test]
    fn numeric_text_is_written_as_numbers() {
        let set = Sparse::Present(DataSet::from_text_entries([("a", "12.5"), ("b", "open")]));
        assert_eq!(wire(DataSetEntries(&set)), r#"{"a":12.5,"b":"open"}"#);
    }

    #[test]
    fn unavailable_is_the_sentinel() {
        assert_eq!(wire(DataSetEntries(&Sparse::Unavailable)), r#""UNAVAILABLE""#);
    }

    #[test]
    fn keys_are_never_classified() {
        let set = Sparse::Present(DataSet::from_text_entries([("1", "x"), ("2.5", "7")]));
        assert_eq!(wire(DataSetEntries(&set)), r#"{"1":"x","2.5":7.0}"#);
    }

    #[test]
    fn null_values_are_written_as_null() {
        let set = Sparse::Present(DataSet::from_entries([("gone", Scalar::Null)]));
        assert_eq!(wire(DataSetEntries(&set)), r#"{"gone":null}"#);
    }

    #[test]
    fn present_empty_is_an_empty_object() {
        let set = Sparse::Present(DataSet::new());
        assert_eq!(wire(DataSetEntries(&set)), "{}");
        assert_eq!(decode(json!({}), SentinelPolicy::Strict).unwrap(), set);
    }

    #[test]
    fn decode_preserves_member_order_and_types() {
        let decoded = decode(json!({"z": 1, "a": "1", "m": 2.5}), SentinelPolicy::Strict)
            .unwrap()
            .into_present()
            .unwrap();
        let entries: Vec<_> = decoded.iter().map(|(k, v)| (k.to_string(), v.clone())).collect();
        assert_eq!(
            entries,
            vec![
                ("z".to_string(), Scalar::Number(1.0)),
                ("a".to_string(), Scalar::text("1")),
                ("m".to_string(), Scalar::Number(2.5)),
            ]
        );
    }

    #[test]
    fn strict_policy_rejects_other_strings() {
        assert_eq!(decode(json!("UNAVAILABLE"), SentinelPolicy::Strict).unwrap(), Sparse::Unavailable);
        let err = decode(json!("n/a"), SentinelPolicy::Strict).unwrap_err();
        assert!(err.to_string().contains("n/a"));
    }

    #[test]
    fn lenient_policy_accepts_any_string() {
        assert_eq!(decode(json!("n/a"), SentinelPolicy::Lenient).unwrap(), Sparse::Unavailable);
    }

    #[test]
    fn other_tokens_are_malformed() {
        for bad in [json!(1), json!([1, 2]), json!(null), json!(true)] {
            assert!(decode(bad, SentinelPolicy::Lenient).is_err());
        }
        assert!(decode(json!({"a": [1]}), SentinelPolicy::Strict).is_err());
    }
}
