//! mtc-core: shared foundation for the MTConnect streams codec.
//!
//! Contains:
//! - numeric (Real, finiteness checks, invariant number parsing)
//! - scalar (numeric-or-text values, classified at ingestion)
//! - ids (agent sequence numbers)
//! - kinds (representation, category, condition level)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod kinds;
pub mod numeric;
pub mod scalar;

pub use error::{MtcError, MtcResult};
pub use ids::*;
pub use kinds::*;
pub use numeric::*;
pub use scalar::Scalar;
