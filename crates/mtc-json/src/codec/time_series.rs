//! TIME_SERIES payloads: `"UNAVAILABLE"` or an array of numbers in sample order.

use core::fmt;

use mtc_streams::{Sparse, TimeSeries};
use serde::de::{self, DeserializeSeed, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

use super::{SentinelPolicy, UNAVAILABLE};

pub struct TimeSeriesSamples<'a>(pub &'a Sparse<TimeSeries>);

impl Serialize for TimeSeriesSamples<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let series = match self.0 {
            Sparse::Unavailable => return serializer.serialize_str(UNAVAILABLE),
            Sparse::Present(series) => series,
        };

        let mut seq = serializer.serialize_seq(Some(series.len()))?;
        for sample in series.samples() {
            seq.serialize_element(sample)?;
        }
        seq.end()
    }
}

#[derive(Clone, Copy, Default)]
pub struct TimeSeriesSeed(pub SentinelPolicy);

impl<'de> DeserializeSeed<'de> for TimeSeriesSeed {
    type Value = Sparse<TimeSeries>;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_any(TimeSeriesVisitor { policy: self.0 })
    }
}

struct TimeSeriesVisitor {
    policy: SentinelPolicy,
}

impl<'de> Visitor<'de> for TimeSeriesVisitor {
    type Value = Sparse<TimeSeries>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an array of numbers or \"UNAVAILABLE\"")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        self.policy.check(v, &self)?;
        Ok(Sparse::Unavailable)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut samples = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(sample) = seq.next_element::<f64>()? {
            samples.push(sample);
        }
        TimeSeries::new(samples)
            .map(Sparse::Present)
            .map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::wire;
    use serde_json::json;

    fn series(samples: &[f64]) -> Sparse<TimeSeries> {
        Sparse::Present(TimeSeries::new(samples.to_vec()).unwrap())
    }

    #[test]
    fn encode_keeps_sample_order() {
        assert_eq!(wire(TimeSeriesSamples(&series(&[0.1, 0.2, 0.15]))), "[0.1,0.2,0.15]");
        assert_eq!(wire(TimeSeriesSamples(&series(&[1.0, 2.0, 3.0]))), "[1.0,2.0,3.0]");
    }

    #[test]
    fn decode_keeps_sample_order() {
        let decoded = TimeSeriesSeed(SentinelPolicy::Strict)
            .deserialize(&json!([3.0, 1.0, 2.0]))
            .unwrap();
        assert_eq!(decoded, series(&[3.0, 1.0, 2.0]));
    }

    #[test]
    fn integers_decode_as_samples() {
        let decoded = TimeSeriesSeed(SentinelPolicy::Strict)
            .deserialize(&json!([1, -2, 3]))
            .unwrap();
        assert_eq!(decoded, series(&[1.0, -2.0, 3.0]));
    }

    #[test]
    fn unavailable_round_trip() {
        assert_eq!(wire(TimeSeriesSamples(&Sparse::Unavailable)), r#""UNAVAILABLE""#);
        assert_eq!(
            TimeSeriesSeed(SentinelPolicy::Strict)
                .deserialize(&json!("UNAVAILABLE"))
                .unwrap(),
            Sparse::Unavailable
        );
    }

    #[test]
    fn non_numeric_elements_are_malformed() {
        let seed = TimeSeriesSeed(SentinelPolicy::Lenient);
        assert!(seed.deserialize(&json!([1.0, "2.0"])).is_err());
        assert!(seed.deserialize(&json!([1.0, null])).is_err());
        assert!(seed.deserialize(&json!([[1.0]])).is_err());
    }

    #[test]
    fn other_tokens_are_malformed() {
        let seed = TimeSeriesSeed(SentinelPolicy::Strict);
        assert!(seed.deserialize(&json!({"0": 1.0})).is_err());
        assert!(seed.deserialize(&json!(1.0)).is_err());
        assert!(seed.deserialize(&json!("0.1 0.2")).is_err());
    }
}
