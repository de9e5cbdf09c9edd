//! Observation classification enums.

use core::fmt;
use core::str::FromStr;

use crate::MtcError;

/// How an observation's payload is shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum Representation {
    Value,
    DataSet,
    Table,
    TimeSeries,
}

impl Representation {
    pub const ALL: [Representation; 4] = [
        Representation::Value,
        Representation::DataSet,
        Representation::Table,
        Representation::TimeSeries,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Representation::Value => "VALUE",
            Representation::DataSet => "DATA_SET",
            Representation::Table => "TABLE",
            Representation::TimeSeries => "TIME_SERIES",
        }
    }

    /// Suffix appended to the element name to form the JSON field name.
    pub fn suffix(self) -> &'static str {
        match self {
            Representation::Value => "",
            Representation::DataSet => "DataSet",
            Representation::Table => "Table",
            Representation::TimeSeries => "TimeSeries",
        }
    }

    /// CONDITION carries plain values only; TIME_SERIES is sample-only.
    pub fn allowed_for(self, category: Category) -> bool {
        match (category, self) {
            (Category::Condition, Representation::Value) => true,
            (Category::Condition, _) => false,
            (Category::Event, Representation::TimeSeries) => false,
            _ => true,
        }
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Representation {
    type Err = MtcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Representation::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| MtcError::UnknownRepresentation {
                value: s.to_string(),
            })
    }
}

/// Observation category, which also picks the JSON container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum Category {
    Sample,
    Event,
    Condition,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Sample, Category::Event, Category::Condition];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Sample => "SAMPLE",
            Category::Event => "EVENT",
            Category::Condition => "CONDITION",
        }
    }

    /// Name of the component stream member holding this category.
    pub fn container(self) -> &'static str {
        match self {
            Category::Sample => "Samples",
            Category::Event => "Events",
            Category::Condition => "Condition",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = MtcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| MtcError::UnknownCategory {
                value: s.to_string(),
            })
    }
}

/// State reported by a CONDITION observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConditionLevel {
    Normal,
    Warning,
    Fault,
    Unavailable,
}

impl ConditionLevel {
    pub const ALL: [ConditionLevel; 4] = [
        ConditionLevel::Normal,
        ConditionLevel::Warning,
        ConditionLevel::Fault,
        ConditionLevel::Unavailable,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ConditionLevel::Normal => "Normal",
            ConditionLevel::Warning => "Warning",
            ConditionLevel::Fault => "Fault",
            ConditionLevel::Unavailable => "Unavailable",
        }
    }
}

impl fmt::Display for ConditionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConditionLevel {
    type Err = MtcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConditionLevel::ALL
            .into_iter()
            .find(|l| l.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| MtcError::UnknownConditionLevel {
                value: s.to_string(),
            })
    }
}
