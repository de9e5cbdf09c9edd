use crate::MtcError;

/// Floating point type used for every numeric telemetry value
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, MtcError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(MtcError::NonFinite { what, value: v })
    }
}

/// Parse text as a finite number using invariant conventions.
///
/// `.` is the only decimal separator and grouping separators are rejected.
/// Surrounding whitespace is ignored. `NaN` and infinities are rejected since
/// they have no JSON number form.
pub fn parse_invariant(text: &str) -> Option<Real> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<Real>().ok().filter(|v| v.is_finite())
}
