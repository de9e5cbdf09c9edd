//! mtc-streams: MTConnect streams object model and validation.

pub mod catalog;
pub mod observation;
pub mod payload;
pub mod schema;
pub mod sparse;
pub mod validate;

pub use catalog::{DataItemType, data_item_types, element_name, type_id_for_element};
pub use observation::{ConditionDetail, Observation};
pub use payload::{DataSet, Payload, Table, TimeSeries};
pub use schema::*;
pub use sparse::Sparse;
pub use validate::{ValidationError, validate_streams};
