//! Sparse value codec.
//!
//! Payloads are a tagged union of "unavailable" and "present". On the wire the
//! unavailable state is the string [`UNAVAILABLE`]; present payloads are
//! objects (data sets, tables) or number arrays (time series). Scalars inside
//! data sets and tables are written as JSON numbers when they were classified
//! numeric at ingestion and as strings otherwise.
//!
//! Encoders implement [`serde::Serialize`] and decoders are
//! [`serde::de::DeserializeSeed`]s, so they run against any serde token
//! stream. The `encode_*`/`decode_*` helpers work on [`serde_json::Value`].

pub mod data_set;
pub mod scalar;
pub mod table;
pub mod time_series;
pub mod value;

use mtc_core::Representation;
use mtc_streams::Payload;
use serde::de::{self, DeserializeSeed, Unexpected};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{JsonError, JsonResult};

pub use data_set::{DataSetEntries, DataSetSeed};
pub use table::{TableEntries, TableSeed, written_rows};
pub use time_series::{TimeSeriesSamples, TimeSeriesSeed};
pub use value::{ValueEntry, ValueSeed};

/// Wire spelling of an intentionally absent payload.
pub const UNAVAILABLE: &str = "UNAVAILABLE";

/// Which string tokens decode as the unavailable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentinelPolicy {
    /// Only the exact string `UNAVAILABLE`.
    #[default]
    Strict,
    /// Any string token.
    Lenient,
}

impl SentinelPolicy {
    pub fn accepts(self, text: &str) -> bool {
        match self {
            SentinelPolicy::Strict => text == UNAVAILABLE,
            SentinelPolicy::Lenient => true,
        }
    }

    fn check<E: de::Error>(self, text: &str, expected: &dyn de::Expected) -> Result<(), E> {
        if self.accepts(text) {
            Ok(())
        } else {
            Err(E::invalid_value(Unexpected::Str(text), expected))
        }
    }
}

/// Encode a payload with the options relevant to the wire shape.
pub fn encode_payload(payload: &Payload, skip_empty_table_rows: bool) -> JsonResult<Value> {
    let value = match payload {
        Payload::Value(v) => serde_json::to_value(ValueEntry(v)),
        Payload::DataSet(v) => serde_json::to_value(DataSetEntries(v)),
        Payload::Table(v) => serde_json::to_value(TableEntries {
            payload: v,
            skip_empty_rows: skip_empty_table_rows,
        }),
        Payload::TimeSeries(v) => serde_json::to_value(TimeSeriesSamples(v)),
    };
    value.map_err(|err| malformed(payload.representation(), err))
}

/// Decode the `value` member of an entry into the payload for `representation`.
pub fn decode_payload(
    value: &Value,
    representation: Representation,
    policy: SentinelPolicy,
) -> JsonResult<Payload> {
    let decoded = match representation {
        Representation::Value => ValueSeed.deserialize(value).map(Payload::Value),
        Representation::DataSet => DataSetSeed(policy).deserialize(value).map(Payload::DataSet),
        Representation::Table => TableSeed(policy).deserialize(value).map(Payload::Table),
        Representation::TimeSeries => TimeSeriesSeed(policy)
            .deserialize(value)
            .map(Payload::TimeSeries),
    };
    decoded.map_err(|err| malformed(representation, err))
}

/// Decode a payload from its JSON text, running the seed on the token stream.
///
/// Unlike [`decode_payload`], repeated object keys reach the decoder, so the
/// first occurrence wins.
pub fn decode_payload_str(
    text: &str,
    representation: Representation,
    policy: SentinelPolicy,
) -> JsonResult<Payload> {
    let mut de = serde_json::Deserializer::from_str(text);
    let decoded = match representation {
        Representation::Value => ValueSeed.deserialize(&mut de).map(Payload::Value),
        Representation::DataSet => DataSetSeed(policy).deserialize(&mut de).map(Payload::DataSet),
        Representation::Table => TableSeed(policy).deserialize(&mut de).map(Payload::Table),
        Representation::TimeSeries => TimeSeriesSeed(policy)
            .deserialize(&mut de)
            .map(Payload::TimeSeries),
    };
    decoded
        .and_then(|payload| de.end().map(|()| payload))
        .map_err(|err| malformed(representation, err))
}

fn malformed(representation: Representation, err: serde_json::Error) -> JsonError {
    JsonError::MalformedPayload {
        representation,
        reason: err.to_string(),
    }
}

#[cfg(test)]
pub(crate) fn wire(value: impl Serialize) -> String {
    serde_json::to_string(&value).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mtc_core::Scalar;
    use mtc_streams::{DataSet, Sparse, Table, TimeSeries};
    use serde_json::json;

    #[test]
    fn strict_policy_accepts_only_the_sentinel() {
        assert!(SentinelPolicy::Strict.accepts("UNAVAILABLE"));
        assert!(!SentinelPolicy::Strict.accepts("unavailable"));
        assert!(!SentinelPolicy::Strict.accepts(""));
        assert!(SentinelPolicy::Lenient.accepts("anything"));
    }

    #[test]
    fn unavailable_round_trips_for_every_representation() {
        for r in Representation::ALL {
            let encoded = encode_payload(&Payload::unavailable(r), true).unwrap();
            assert_eq!(encoded, json!("UNAVAILABLE"));
            let decoded = decode_payload(&encoded, r, SentinelPolicy::Strict).unwrap();
            assert_eq!(decoded, Payload::unavailable(r));
        }
    }

    #[test]
    fn decode_reports_representation_on_mismatch() {
        let err = decode_payload(&json!(42), Representation::DataSet, SentinelPolicy::Strict)
            .unwrap_err();
        match err {
            JsonError::MalformedPayload {
                representation,
                reason,
            } => {
                assert_eq!(representation, Representation::DataSet);
                assert!(reason.contains("integer"), "{reason}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn repeated_keys_keep_the_first_value() {
        let decoded = decode_payload_str(
            r#"{"a":1,"b":"x","a":2}"#,
            Representation::DataSet,
            SentinelPolicy::Strict,
        )
        .unwrap();
        let Payload::DataSet(Sparse::Present(set)) = decoded else {
            panic!("expected a present data set");
        };
        assert_eq!(set.get("a"), Some(&Scalar::Number(1.0)));
        assert_eq!(set.len(), 2);

        let decoded = decode_payload_str(
            r#"{"r":{"k":"first"},"r":{"k":"second"}}"#,
            Representation::Table,
            SentinelPolicy::Strict,
        )
        .unwrap();
        let Payload::Table(Sparse::Present(table)) = decoded else {
            panic!("expected a present table");
        };
        assert_eq!(table.get("r").unwrap().get("k"), Some(&Scalar::text("first")));
    }

    #[test]
    fn trailing_tokens_are_malformed() {
        let err = decode_payload_str("[1.0] [2.0]", Representation::TimeSeries, SentinelPolicy::Strict)
            .unwrap_err();
        assert!(matches!(err, JsonError::MalformedPayload { .. }), "{err}");
    }

    #[test]
    fn encode_dispatches_on_payload_shape() {
        let set: Payload = DataSet::from_text_entries([("a", "1")]).into();
        assert_eq!(encode_payload(&set, true).unwrap(), json!({"a": 1.0}));

        let table: Payload =
            Table::from_rows([("r", DataSet::from_text_entries([("k", "v")]))]).into();
        assert_eq!(encode_payload(&table, true).unwrap(), json!({"r": {"k": "v"}}));

        let series: Payload = TimeSeries::new(vec![2.0, 1.0]).unwrap().into();
        assert_eq!(encode_payload(&series, true).unwrap(), json!([2.0, 1.0]));

        let value = Payload::Value(Sparse::Present(Scalar::text("ACTIVE")));
        assert_eq!(encode_payload(&value, true).unwrap(), json!("ACTIVE"));
    }

    #[test]
    fn non_finite_numbers_fail_encode() {
        let set: Payload = DataSet::from_entries([("a", Scalar::Number(f64::NAN))]).into();
        let err = encode_payload(&set, true).unwrap_err();
        match err {
            JsonError::MalformedPayload { representation, .. } => {
                assert_eq!(representation, Representation::DataSet);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
