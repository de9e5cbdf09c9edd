//! Scalar values carried by observations and data set entries.

use core::fmt;

use crate::numeric::{Real, parse_invariant};

/// A telemetry scalar, classified once when it enters the system.
///
/// Upstream sources usually deliver values as text. [`Scalar::parse`] decides
/// whether the text is numeric so that writers never need to re-parse it.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Number(Real),
    Text(String),
    /// Value absent at the source.
    Null,
}

impl Scalar {
    /// Classify text: finite invariant-culture numbers become
    /// [`Scalar::Number`], everything else (including empty text) stays text.
    pub fn parse(text: &str) -> Self {
        match parse_invariant(text) {
            Some(v) => Scalar::Number(v),
            None => Scalar::Text(text.to_string()),
        }
    }

    /// Like [`Scalar::parse`] but maps a missing value to [`Scalar::Null`].
    pub fn from_optional(text: Option<&str>) -> Self {
        text.map_or(Scalar::Null, Scalar::parse)
    }

    /// Text that is kept as text even when it looks numeric.
    pub fn text(text: impl Into<String>) -> Self {
        Scalar::Text(text.into())
    }

    pub fn as_f64(&self) -> Option<Real> {
        match self {
            Scalar::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Scalar::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Scalar::Number(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }
}

impl From<Real> for Scalar {
    fn from(v: Real) -> Self {
        Scalar::Number(v)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Number(v) => write!(f, "{v}"),
            Scalar::Text(s) => f.write_str(s),
            Scalar::Null => Ok(()),
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn finite_numbers_classify_as_numeric(v in -1.0e12_f64..1.0e12_f64) {
            prop_assert_eq!(Scalar::parse(&v.to_string()), Scalar::Number(v));
        }

        #[test]
        fn alphabetic_text_never_classifies_as_numeric(s in "[g-mo-z]{1,12}") {
            prop_assert!(!Scalar::parse(&s).is_numeric());
        }
    }
}
