//! Streams documents: object model to wire shapes and back.
//!
//! Samples and events are keyed by field name (see [`crate::dispatch`]).
//! Conditions are keyed by level, in Normal, Warning, Fault, Unavailable
//! order. Decoding is tolerant per observation: an entry whose payload does
//! not match its field is dropped and reported, its siblings are kept.

use core::fmt;

use indexmap::IndexMap;
use mtc_core::{Category, ConditionLevel};
use mtc_streams::{ComponentStream, DeviceStream, Observation, Streams};

use crate::dispatch::{group_observations, parse_field_name};
use crate::wire::{
    EntryMap, JsonComponentStream, JsonDeviceStream, JsonEnvelope, JsonObservation,
    JsonStreams, JsonStreamsDocument,
};
use crate::{CodecOptions, JsonError, JsonResult};

/// Result of decoding a document.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub streams: Streams,
    pub report: DecodeReport,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DecodeReport {
    pub issues: Vec<DecodeIssue>,
}

impl DecodeReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    fn record(&mut self, issue: DecodeIssue) {
        tracing::warn!(
            device = %issue.device,
            component_id = %issue.component_id,
            field = %issue.field,
            data_item_id = %issue.data_item_id,
            reason = %issue.reason,
            "dropped observation"
        );
        self.issues.push(issue);
    }
}

/// An observation that was dropped while decoding.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeIssue {
    pub device: String,
    pub component_id: String,
    /// Field name, or condition level for condition entries.
    pub field: String,
    pub data_item_id: String,
    pub reason: String,
}

impl fmt::Display for DecodeIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}[{}]: {}",
            self.device, self.component_id, self.field, self.data_item_id, self.reason
        )
    }
}

pub fn encode_document(streams: &Streams, options: &CodecOptions) -> JsonResult<JsonStreamsDocument> {
    let devices = streams
        .devices
        .iter()
        .map(|device| encode_device(device, options))
        .collect::<JsonResult<Vec<_>>>()?;

    Ok(JsonStreamsDocument {
        envelope: JsonEnvelope {
            header: streams.header.clone(),
            streams: JsonStreams { devices },
        },
    })
}

fn encode_device(device: &DeviceStream, options: &CodecOptions) -> JsonResult<JsonDeviceStream> {
    let components = device
        .components
        .iter()
        .map(|component| encode_component(&device.uuid, component, options))
        .collect::<JsonResult<Vec<_>>>()?;

    Ok(JsonDeviceStream {
        name: device.name.clone(),
        uuid: device.uuid.clone(),
        components,
    })
}

fn encode_component(
    device: &str,
    component: &ComponentStream,
    options: &CodecOptions,
) -> JsonResult<JsonComponentStream> {
    let mut json = JsonComponentStream {
        component: component.component.clone(),
        component_id: component.component_id.clone(),
        name: component.name.clone(),
        native_name: component.native_name.clone(),
        uuid: component.uuid.clone(),
        samples: IndexMap::new(),
        events: IndexMap::new(),
        condition: IndexMap::new(),
    };

    for category in [Category::Sample, Category::Event] {
        let entries = json.entries_mut(category);
        for group in group_observations(&component.observations, category) {
            if parse_field_name(&group.field) != (group.type_id.to_string(), group.representation) {
                return Err(JsonError::Structure {
                    path: format!(
                        "{device}/{}/{}/{}",
                        component.component_id,
                        category.container(),
                        group.field
                    ),
                    reason: format!(
                        "type {} with representation {} does not map to a decodable field",
                        group.type_id, group.representation
                    ),
                });
            }
            let encoded = encode_entries(group.observations, options)?;
            entries.insert(group.field, encoded);
        }
    }

    for observation in component.observations_of(Category::Condition) {
        if observation.condition.is_none() {
            return Err(JsonError::Structure {
                path: format!("{device}/{}/Condition", component.component_id),
                reason: format!("observation '{}' has no level", observation.data_item_id),
            });
        }
    }
    for level in ConditionLevel::ALL {
        let at_level = component
            .observations_of(Category::Condition)
            .filter(|o| o.condition.as_ref().is_some_and(|c| c.level == level));
        let encoded = encode_entries(at_level, options)?;
        if !encoded.is_empty() {
            json.condition.insert(level.as_str().to_string(), encoded);
        }
    }

    Ok(json)
}

fn encode_entries<'a, I>(observations: I, options: &CodecOptions) -> JsonResult<Vec<JsonObservation>>
where
    I: IntoIterator<Item = &'a Observation>,
{
    observations
        .into_iter()
        .map(|o| JsonObservation::from_observation(o, options))
        .collect()
}

pub fn decode_document(document: JsonStreamsDocument, options: &CodecOptions) -> Decoded {
    let JsonEnvelope { header, streams } = document.envelope;
    let mut report = DecodeReport::default();

    let devices = streams
        .devices
        .into_iter()
        .map(|device| decode_device(device, options, &mut report))
        .collect();

    let streams = Streams { header, devices };
    tracing::debug!(
        observations = streams.observation_count(),
        dropped = report.len(),
        "decoded streams document"
    );
    Decoded { streams, report }
}

fn decode_device(
    device: JsonDeviceStream,
    options: &CodecOptions,
    report: &mut DecodeReport,
) -> DeviceStream {
    let mut decoded = DeviceStream::new(device.name, device.uuid);
    for component in device.components {
        let component = decode_component(&decoded.uuid, component, options, report);
        decoded.components.push(component);
    }
    decoded
}

fn decode_component(
    device: &str,
    json: JsonComponentStream,
    options: &CodecOptions,
    report: &mut DecodeReport,
) -> ComponentStream {
    let mut component = ComponentStream::new(json.component, json.component_id);
    component.name = json.name;
    component.native_name = json.native_name;
    component.uuid = json.uuid;

    let mut issue = |field: &str, data_item_id: String, err: &dyn fmt::Display| {
        report.record(DecodeIssue {
            device: device.to_string(),
            component_id: component.component_id.clone(),
            field: field.to_string(),
            data_item_id,
            reason: err.to_string(),
        });
    };

    let mut observations = Vec::new();
    for (category, entries) in [(Category::Sample, json.samples), (Category::Event, json.events)] {
        for (field, list) in entries {
            let (type_id, representation) = parse_field_name(&field);
            for entry in list {
                let id = entry.data_item_id.clone();
                match entry.into_observation(
                    type_id.clone(),
                    category,
                    representation,
                    options.sentinel_policy,
                ) {
                    Ok(observation) => observations.push(observation),
                    Err(err) => issue(&field, id, &err),
                }
            }
        }
    }

    decode_conditions(json.condition, &mut observations, &mut issue);

    component.observations = observations;
    component
}

fn decode_conditions(
    entries: EntryMap,
    observations: &mut Vec<Observation>,
    issue: &mut impl FnMut(&str, String, &dyn fmt::Display),
) {
    for (level_name, list) in entries {
        let level = match level_name.parse::<ConditionLevel>() {
            Ok(level) => level,
            Err(err) => {
                for entry in list {
                    issue(&level_name, entry.data_item_id, &err);
                }
                continue;
            }
        };
        for entry in list {
            let id = entry.data_item_id.clone();
            match entry.into_condition(level) {
                Ok(observation) => observations.push(observation),
                Err(err) => issue(&level_name, id, &err),
            }
        }
    }
}
