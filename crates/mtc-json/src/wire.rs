//! JSON wire shapes of a streams document.
//!
//! Each struct is a flat mapping of one document element. Observation entries
//! keep their payload as raw JSON text so that the payload decoders see the
//! original token stream, repeated keys included, and a malformed
//! payload only affects its own entry.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use mtc_core::{Category, ConditionLevel, Real, Representation, SequenceNumber};
use mtc_streams::{ConditionDetail, Header, Observation, Payload, Sparse};
use serde::{Deserialize, Serialize};
use serde_json::value::{RawValue, to_raw_value};

use crate::codec::{self, SentinelPolicy, written_rows};
use crate::{CodecOptions, JsonError, JsonResult};

/// Field name to entries, in document order.
pub type EntryMap = IndexMap<String, Vec<JsonObservation>>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonStreamsDocument {
    #[serde(rename = "MTConnectStreams")]
    pub envelope: JsonEnvelope,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonEnvelope {
    #[serde(rename = "Header", default, skip_serializing_if = "Option::is_none")]
    pub header: Option<Header>,
    #[serde(rename = "Streams", default)]
    pub streams: JsonStreams,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct JsonStreams {
    #[serde(rename = "DeviceStream", default)]
    pub devices: Vec<JsonDeviceStream>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonDeviceStream {
    pub name: String,
    pub uuid: String,
    #[serde(rename = "ComponentStream", default)]
    pub components: Vec<JsonComponentStream>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonComponentStream {
    pub component: String,
    pub component_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(rename = "Samples", default, skip_serializing_if = "IndexMap::is_empty")]
    pub samples: EntryMap,
    #[serde(rename = "Events", default, skip_serializing_if = "IndexMap::is_empty")]
    pub events: EntryMap,
    /// Keyed by condition level rather than by type.
    #[serde(rename = "Condition", default, skip_serializing_if = "IndexMap::is_empty")]
    pub condition: EntryMap,
}

impl JsonComponentStream {
    pub fn entries(&self, category: Category) -> &EntryMap {
        match category {
            Category::Sample => &self.samples,
            Category::Event => &self.events,
            Category::Condition => &self.condition,
        }
    }

    pub fn entries_mut(&mut self, category: Category) -> &mut EntryMap {
        match category {
            Category::Sample => &mut self.samples,
            Category::Event => &mut self.events,
            Category::Condition => &mut self.condition,
        }
    }
}

/// One observation entry. Optional members are omitted when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonObservation {
    pub data_item_id: String,
    pub timestamp: DateTime<Utc>,
    pub sequence: SequenceNumber,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composition_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<Real>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reset_triggered: Option<String>,
    /// Entry count of a present DATA_SET or TABLE.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<Real>,
    /// Data item type, only written for CONDITION entries.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_severity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualifier: Option<String>,
    /// Payload JSON. A missing member reads as `null`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Box<RawValue>>,
}

impl JsonObservation {
    pub fn from_observation(observation: &Observation, options: &CodecOptions) -> JsonResult<Self> {
        let value = codec::encode_payload(&observation.payload, options.skip_empty_table_rows)?;
        let value = Some(to_raw_value(&value)?);

        let (count, sample_count) = match &observation.payload {
            Payload::DataSet(Sparse::Present(set)) => (Some(set.len()), None),
            Payload::Table(Sparse::Present(table)) => (
                Some(written_rows(table, options.skip_empty_table_rows).count()),
                None,
            ),
            Payload::TimeSeries(series) => (None, Some(series.present().map_or(0, |s| s.len()))),
            _ => (None, None),
        };

        let condition = observation.condition.as_ref();
        let type_id = (observation.category == Category::Condition)
            .then(|| observation.type_id.clone());

        Ok(Self {
            data_item_id: observation.data_item_id.clone(),
            timestamp: observation.timestamp,
            sequence: observation.sequence,
            name: observation.name.clone(),
            sub_type: observation.sub_type.clone(),
            composition_id: observation.composition_id.clone(),
            statistic: observation.statistic.clone(),
            duration: observation.duration,
            reset_triggered: observation.reset_triggered.clone(),
            count,
            sample_count,
            sample_rate: observation.sample_rate,
            type_id,
            native_code: condition.and_then(|c| c.native_code.clone()),
            native_severity: condition.and_then(|c| c.native_severity.clone()),
            qualifier: condition.and_then(|c| c.qualifier.clone()),
            value,
        })
    }

    /// Project a SAMPLE or EVENT entry found under `field` back into an observation.
    pub fn into_observation(
        self,
        type_id: String,
        category: Category,
        representation: Representation,
        policy: SentinelPolicy,
    ) -> JsonResult<Observation> {
        let payload = codec::decode_payload_str(self.value_text(), representation, policy)?;
        self.warn_on_count_mismatch(&payload);
        Ok(self.build(type_id, category, payload, None))
    }

    /// Project a CONDITION entry found under `level` back into an observation.
    pub fn into_condition(self, level: ConditionLevel) -> JsonResult<Observation> {
        let type_id = self.type_id.clone().ok_or_else(|| JsonError::Structure {
            path: format!("Condition.{level}"),
            reason: format!("entry '{}' has no type", self.data_item_id),
        })?;
        let payload = codec::decode_payload_str(self.value_text(), Representation::Value, SentinelPolicy::Strict)?;
        let detail = ConditionDetail {
            level,
            native_code: self.native_code.clone(),
            native_severity: self.native_severity.clone(),
            qualifier: self.qualifier.clone(),
        };
        Ok(self.build(type_id, Category::Condition, payload, Some(detail)))
    }

    fn value_text(&self) -> &str {
        self.value.as_deref().map_or("null", RawValue::get)
    }

    fn build(
        self,
        type_id: String,
        category: Category,
        payload: Payload,
        condition: Option<ConditionDetail>,
    ) -> Observation {
        let mut observation = Observation::new(
            self.data_item_id,
            type_id,
            category,
            self.timestamp,
            self.sequence,
            payload,
        );
        observation.name = self.name;
        observation.sub_type = self.sub_type;
        observation.composition_id = self.composition_id;
        observation.statistic = self.statistic;
        observation.duration = self.duration;
        observation.reset_triggered = self.reset_triggered;
        observation.sample_rate = self.sample_rate;
        observation.condition = condition;
        observation
    }

    fn warn_on_count_mismatch(&self, payload: &Payload) {
        let (declared, actual) = match payload {
            Payload::DataSet(Sparse::Present(set)) => (self.count, set.len()),
            Payload::Table(Sparse::Present(table)) => (self.count, table.len()),
            Payload::TimeSeries(Sparse::Present(series)) => (self.sample_count, series.len()),
            _ => return,
        };
        if let Some(declared) = declared
            && declared != actual
        {
            tracing::debug!(
                data_item_id = %self.data_item_id,
                declared,
                actual,
                "declared entry count differs from payload"
            );
        }
    }
}
