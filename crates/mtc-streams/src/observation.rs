//! Observations reported by a component stream.

use chrono::{DateTime, Utc};
use mtc_core::{Category, ConditionLevel, Real, Representation, SequenceNumber};

use crate::payload::Payload;

/// Extra state carried by CONDITION observations.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionDetail {
    pub level: ConditionLevel,
    pub native_code: Option<String>,
    pub native_severity: Option<String>,
    pub qualifier: Option<String>,
}

impl ConditionDetail {
    pub fn new(level: ConditionLevel) -> Self {
        Self {
            level,
            native_code: None,
            native_severity: None,
            qualifier: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub data_item_id: String,
    /// Data item type in UPPER_SNAKE form, e.g. `PATH_FEEDRATE`.
    pub type_id: String,
    pub category: Category,
    pub timestamp: DateTime<Utc>,
    pub sequence: SequenceNumber,
    pub payload: Payload,
    pub name: Option<String>,
    pub sub_type: Option<String>,
    pub composition_id: Option<String>,
    pub statistic: Option<String>,
    pub duration: Option<Real>,
    pub reset_triggered: Option<String>,
    /// TIME_SERIES only.
    pub sample_rate: Option<Real>,
    /// CONDITION only.
    pub condition: Option<ConditionDetail>,
}

impl Observation {
    pub fn new(
        data_item_id: impl Into<String>,
        type_id: impl Into<String>,
        category: Category,
        timestamp: DateTime<Utc>,
        sequence: SequenceNumber,
        payload: Payload,
    ) -> Self {
        Self {
            data_item_id: data_item_id.into(),
            type_id: type_id.into(),
            category,
            timestamp,
            sequence,
            payload,
            name: None,
            sub_type: None,
            composition_id: None,
            statistic: None,
            duration: None,
            reset_triggered: None,
            sample_rate: None,
            condition: None,
        }
    }

    pub fn representation(&self) -> Representation {
        self.payload.representation()
    }

    pub fn is_unavailable(&self) -> bool {
        self.payload.is_unavailable()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_sub_type(mut self, sub_type: impl Into<String>) -> Self {
        self.sub_type = Some(sub_type.into());
        self
    }

    pub fn with_composition_id(mut self, composition_id: impl Into<String>) -> Self {
        self.composition_id = Some(composition_id.into());
        self
    }

    pub fn with_statistic(mut self, statistic: impl Into<String>, duration: Option<Real>) -> Self {
        self.statistic = Some(statistic.into());
        self.duration = duration;
        self
    }

    pub fn with_reset_triggered(mut self, reset: impl Into<String>) -> Self {
        self.reset_triggered = Some(reset.into());
        self
    }

    pub fn with_sample_rate(mut self, rate: Real) -> Self {
        self.sample_rate = Some(rate);
        self
    }

    pub fn with_condition(mut self, detail: ConditionDetail) -> Self {
        self.condition = Some(detail);
        self
    }
}
