//! Streams document object model.

use chrono::{DateTime, Utc};
use mtc_core::Category;
use serde::{Deserialize, Serialize};

use crate::observation::Observation;

/// Agent header of a streams document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub instance_id: u64,
    pub version: String,
    pub sender: String,
    pub creation_time: DateTime<Utc>,
    pub buffer_size: u64,
    pub first_sequence: u64,
    pub last_sequence: u64,
    pub next_sequence: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_model_change_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Streams {
    pub header: Option<Header>,
    pub devices: Vec<DeviceStream>,
}

impl Streams {
    pub fn new(devices: Vec<DeviceStream>) -> Self {
        Self {
            header: None,
            devices,
        }
    }

    pub fn with_header(mut self, header: Header) -> Self {
        self.header = Some(header);
        self
    }

    /// Every observation in document order.
    pub fn observations(&self) -> impl Iterator<Item = &Observation> {
        self.devices
            .iter()
            .flat_map(|d| d.components.iter())
            .flat_map(|c| c.observations.iter())
    }

    pub fn observation_count(&self) -> usize {
        self.devices
            .iter()
            .flat_map(|d| d.components.iter())
            .map(|c| c.observations.len())
            .sum()
    }

    pub fn device(&self, uuid: &str) -> Option<&DeviceStream> {
        self.devices.iter().find(|d| d.uuid == uuid)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeviceStream {
    pub name: String,
    pub uuid: String,
    pub components: Vec<ComponentStream>,
}

impl DeviceStream {
    pub fn new(name: impl Into<String>, uuid: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            uuid: uuid.into(),
            components: Vec::new(),
        }
    }

    pub fn with_component(mut self, component: ComponentStream) -> Self {
        self.components.push(component);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComponentStream {
    /// Component element type, e.g. `Linear` or `Controller`.
    pub component: String,
    pub component_id: String,
    pub name: Option<String>,
    pub native_name: Option<String>,
    pub uuid: Option<String>,
    pub observations: Vec<Observation>,
}

impl ComponentStream {
    pub fn new(component: impl Into<String>, component_id: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            component_id: component_id.into(),
            name: None,
            native_name: None,
            uuid: None,
            observations: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_observation(mut self, observation: Observation) -> Self {
        self.observations.push(observation);
        self
    }

    pub fn observations_of(&self, category: Category) -> impl Iterator<Item = &Observation> {
        self.observations
            .iter()
            .filter(move |o| o.category == category)
    }
}
