//! Streams validation logic.

use crate::observation::Observation;
use crate::payload::{DataSet, Payload};
use crate::sparse::Sparse;
use crate::schema::{ComponentStream, DeviceStream, Streams};
use mtc_core::{Category, Scalar};
use std::collections::HashSet;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing value: {field} in {context}")]
    Missing { field: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

pub fn validate_streams(streams: &Streams) -> Result<(), ValidationError> {
    let mut device_uuids = HashSet::new();
    for device in &streams.devices {
        if device.uuid.is_empty() {
            return Err(ValidationError::Missing {
                field: "uuid".to_string(),
                context: format!("device '{}'", device.name),
            });
        }
        if !device_uuids.insert(&device.uuid) {
            return Err(ValidationError::DuplicateId {
                id: device.uuid.clone(),
                context: "device streams".to_string(),
            });
        }
        validate_device(device)?;
    }

    if let Some(header) = &streams.header
        && header.first_sequence > header.last_sequence
    {
        return Err(ValidationError::InvalidValue {
            field: "header firstSequence".to_string(),
            value: header.first_sequence.to_string(),
            reason: format!("greater than lastSequence {}", header.last_sequence),
        });
    }

    Ok(())
}

fn validate_device(device: &DeviceStream) -> Result<(), ValidationError> {
    let mut component_ids = HashSet::new();
    for component in &device.components {
        if !component_ids.insert(&component.component_id) {
            return Err(ValidationError::DuplicateId {
                id: component.component_id.clone(),
                context: format!("device '{}' component streams", device.name),
            });
        }
        validate_component(component)?;
    }
    Ok(())
}

fn validate_component(component: &ComponentStream) -> Result<(), ValidationError> {
    for observation in &component.observations {
        let context = format!(
            "component '{}' observation '{}'",
            component.component_id, observation.data_item_id
        );
        validate_observation(observation, &context)?;
    }
    Ok(())
}

fn validate_observation(observation: &Observation, context: &str) -> Result<(), ValidationError> {
    if observation.data_item_id.is_empty() {
        return Err(ValidationError::Missing {
            field: "dataItemId".to_string(),
            context: context.to_string(),
        });
    }

    if observation.type_id.is_empty() {
        return Err(ValidationError::Missing {
            field: "type".to_string(),
            context: context.to_string(),
        });
    }

    let representation = observation.representation();
    if !representation.allowed_for(observation.category) {
        return Err(ValidationError::InvalidValue {
            field: format!("{context} representation"),
            value: representation.to_string(),
            reason: format!("not allowed for category {}", observation.category),
        });
    }

    match (observation.category, &observation.condition) {
        (Category::Condition, None) => {
            return Err(ValidationError::Missing {
                field: "condition level".to_string(),
                context: context.to_string(),
            });
        }
        (Category::Sample | Category::Event, Some(detail)) => {
            return Err(ValidationError::InvalidValue {
                field: format!("{context} condition level"),
                value: detail.level.to_string(),
                reason: format!("only CONDITION observations carry a level, got {}", observation.category),
            });
        }
        _ => {}
    }

    if let Some(rate) = observation.sample_rate
        && (!rate.is_finite() || rate <= 0.0)
    {
        return Err(ValidationError::InvalidValue {
            field: format!("{context} sampleRate"),
            value: rate.to_string(),
            reason: "must be positive and finite".to_string(),
        });
    }

    if let Some(key) = non_finite_number(&observation.payload) {
        return Err(ValidationError::InvalidValue {
            field: format!("{context} value"),
            value: key,
            reason: "numbers must be finite".to_string(),
        });
    }

    if let Some(duration) = observation.duration
        && (!duration.is_finite() || duration < 0.0)
    {
        return Err(ValidationError::InvalidValue {
            field: format!("{context} duration"),
            value: duration.to_string(),
            reason: "must be non-negative and finite".to_string(),
        });
    }

    Ok(())
}

/// Locate a NaN or infinite scalar, which JSON would turn into `null`.
fn non_finite_number(payload: &Payload) -> Option<String> {
    let bad = |scalar: &Scalar| matches!(scalar, Scalar::Number(v) if !v.is_finite());
    let in_set = |set: &DataSet| set.iter().find(|&(_, v)| bad(v)).map(|(k, _)| k.to_string());

    match payload {
        Payload::Value(Sparse::Present(scalar)) if bad(scalar) => Some(scalar.to_string()),
        Payload::DataSet(Sparse::Present(set)) => in_set(set),
        Payload::Table(Sparse::Present(table)) => table
            .iter()
            .find_map(|(row, cells)| in_set(cells).map(|key| format!("{row}.{key}"))),
        _ => None,
    }
}
