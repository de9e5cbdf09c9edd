use thiserror::Error;

pub type MtcResult<T> = Result<T, MtcError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MtcError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Unknown representation: {value}")]
    UnknownRepresentation { value: String },

    #[error("Unknown category: {value}")]
    UnknownCategory { value: String },

    #[error("Unknown condition level: {value}")]
    UnknownConditionLevel { value: String },

    #[error("Sequence numbers start at 1")]
    ZeroSequence,
}
