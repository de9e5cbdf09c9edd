//! TABLE payloads: `"UNAVAILABLE"` or an object of rows, each row an object
//! of scalar cells.
//!
//! Rows without cells are dropped on encode unless `skip_empty_rows` is off.
//! Decoding keeps whatever rows are present, empty ones included.

use core::fmt;

use mtc_streams::{DataSet, Sparse, Table};
use serde::de::{self, DeserializeSeed, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::data_set::{EntryMap, read_entries};
use super::{SentinelPolicy, UNAVAILABLE};

pub struct TableEntries<'a> {
    pub payload: &'a Sparse<Table>,
    pub skip_empty_rows: bool,
}

impl<'a> TableEntries<'a> {
    pub fn new(payload: &'a Sparse<Table>) -> Self {
        Self {
            payload,
            skip_empty_rows: true,
        }
    }
}

impl Serialize for TableEntries<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let table = match self.payload {
            Sparse::Unavailable => return serializer.serialize_str(UNAVAILABLE),
            Sparse::Present(table) => table,
        };

        let mut map = serializer.serialize_map(None)?;
        for (key, row) in written_rows(table, self.skip_empty_rows) {
            map.serialize_entry(key, &EntryMap(row))?;
        }
        map.end()
    }
}

/// Rows that end up on the wire for a present table.
pub fn written_rows(table: &Table, skip_empty_rows: bool) -> impl Iterator<Item = (&str, &DataSet)> {
    table
        .iter()
        .filter(move |(_, row)| !(skip_empty_rows && row.is_empty()))
}

#[derive(Clone, Copy, Default)]
pub struct TableSeed(pub SentinelPolicy);

impl<'de> DeserializeSeed<'de> for TableSeed {
    type Value = Sparse<Table>;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_any(TableVisitor { policy: self.0 })
    }
}

struct TableVisitor {
    policy: SentinelPolicy,
}

impl<'de> Visitor<'de> for TableVisitor {
    type Value = Sparse<Table>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an object of table rows or \"UNAVAILABLE\"")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        self.policy.check(v, &self)?;
        Ok(Sparse::Unavailable)
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut table = Table::new();
        while let Some(key) = map.next_key::<String>()? {
            let row = map.next_value_seed(RowSeed)?;
            table.insert_first(key, row);
        }
        Ok(Sparse::Present(table))
    }
}

/// A row must be an object; the sentinel is only valid for the whole table.
struct RowSeed;

impl<'de> DeserializeSeed<'de> for RowSeed {
    type Value = DataSet;

    fn deserialize<D>(self, deserializer: D) -> Result<DataSet, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_map(RowVisitor)
    }
}

struct RowVisitor;

impl<'de> Visitor<'de> for RowVisitor {
    type Value = DataSet;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an object of table cells")
    }

    fn visit_map<A>(self, map: A) -> Result<DataSet, A::Error>
    where
        A: MapAccess<'de>,
    {
        read_entries(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::wire;
    use mtc_core::Scalar;
    use serde_json::json;

    fn tool_table() -> Sparse<Table> {
        Sparse::Present(Table::from_rows([
            ("tool1", DataSet::from_text_entries([("wear", "0.02")])),
            ("tool2", DataSet::new()),
        ]))
    }

    #[test]
    fn empty_rows_are_dropped() {
        assert_eq!(wire(TableEntries::new(&tool_table())), r#"{"tool1":{"wear":0.02}}"#);
    }

    #[test]
    fn written_rows_follow_the_skip_flag() {
        let table = tool_table().into_present().unwrap();
        assert_eq!(written_rows(&table, true).count(), 1);
        assert_eq!(written_rows(&table, false).count(), 2);
    }

    #[test]
    fn empty_rows_can_be_kept() {
        let table = tool_table();
        let entries = TableEntries {
            payload: &table,
            skip_empty_rows: false,
        };
        assert_eq!(wire(entries), r#"{"tool1":{"wear":0.02},"tool2":{}}"#);
    }

    #[test]
    fn unavailable_is_the_sentinel() {
        assert_eq!(wire(TableEntries::new(&Sparse::Unavailable)), r#""UNAVAILABLE""#);
    }

    #[test]
    fn cells_follow_the_scalar_rule() {
        let table = Sparse::Present(Table::from_rows([(
            "T1",
            DataSet::from_text_entries([("LENGTH", "120.5"), ("STATE", "NEW"), ("ID", "")]),
        )]));
        assert_eq!(
            wire(TableEntries::new(&table)),
            r#"{"T1":{"LENGTH":120.5,"STATE":"NEW","ID":""}}"#
        );
    }

    #[test]
    fn decode_mirrors_structure_and_keeps_empty_rows() {
        let decoded = TableSeed(SentinelPolicy::Strict)
            .deserialize(&json!({"b": {"x": 1, "y": "on"}, "a": {}}))
            .unwrap()
            .into_present()
            .unwrap();
        assert_eq!(decoded.iter().map(|(k, _)| k).collect::<Vec<_>>(), vec!["b", "a"]);
        let b = decoded.get("b").unwrap();
        assert_eq!(b.get("x"), Some(&Scalar::Number(1.0)));
        assert_eq!(b.get("y"), Some(&Scalar::text("on")));
        assert!(decoded.get("a").unwrap().is_empty());
    }

    #[test]
    fn row_must_be_an_object() {
        let seed = TableSeed(SentinelPolicy::Lenient);
        assert!(seed.deserialize(&json!({"r": "UNAVAILABLE"})).is_err());
        assert!(seed.deserialize(&json!({"r": [1]})).is_err());
        assert!(seed.deserialize(&json!([{"r": {}}])).is_err());
    }

    #[test]
    fn sentinel_policy_applies_to_the_table() {
        assert_eq!(
            TableSeed(SentinelPolicy::Strict).deserialize(&json!("UNAVAILABLE")).unwrap(),
            Sparse::Unavailable
        );
        assert!(TableSeed(SentinelPolicy::Strict).deserialize(&json!("n/a")).is_err());
    }
}
