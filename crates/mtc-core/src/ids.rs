use core::fmt;
use core::num::NonZeroU64;

use crate::{MtcError, MtcResult};

/// Agent-assigned sequence number of an observation.
///
/// - MTConnect agents number observations from 1
/// - `NonZero` lets `Option<SequenceNumber>` stay the size of a `u64`
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SequenceNumber(NonZeroU64);

impl SequenceNumber {
    pub fn new(value: u64) -> MtcResult<Self> {
        NonZeroU64::new(value)
            .map(Self)
            .ok_or(MtcError::ZeroSequence)
    }

    pub fn get(self) -> u64 {
        self.0.get()
    }

    /// The sequence number that follows this one, saturating at `u64::MAX`.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl TryFrom<u64> for SequenceNumber {
    type Error = MtcError;

    fn try_from(value: u64) -> MtcResult<Self> {
        Self::new(value)
    }
}

impl From<SequenceNumber> for u64 {
    fn from(seq: SequenceNumber) -> Self {
        seq.get()
    }
}

impl fmt::Debug for SequenceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seq({})", self.get())
    }
}

impl fmt::Display for SequenceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for SequenceNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u64(self.get())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for SequenceNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = u64::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_rejected() {
        assert_eq!(SequenceNumber::new(0), Err(MtcError::ZeroSequence));
    }

    #[test]
    fn next_increments() {
        let seq = SequenceNumber::new(41).unwrap();
        assert_eq!(seq.next().get(), 42);
        assert_eq!(SequenceNumber::new(u64::MAX).unwrap().next().get(), u64::MAX);
    }

    #[test]
    fn option_sequence_is_small() {
        assert_eq!(
            core::mem::size_of::<SequenceNumber>(),
            core::mem::size_of::<Option<SequenceNumber>>()
        );
    }
}
