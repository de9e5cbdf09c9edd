//! Payload availability.

/// A payload that is either intentionally unavailable or present.
///
/// Only the wire codec knows that `Unavailable` is spelled `"UNAVAILABLE"`.
/// `Present` with zero entries is a distinct, valid state.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Sparse<T> {
    #[default]
    Unavailable,
    Present(T),
}

impl<T> Sparse<T> {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Sparse::Unavailable)
    }

    pub fn present(&self) -> Option<&T> {
        match self {
            Sparse::Present(v) => Some(v),
            Sparse::Unavailable => None,
        }
    }

    pub fn into_present(self) -> Option<T> {
        match self {
            Sparse::Present(v) => Some(v),
            Sparse::Unavailable => None,
        }
    }

    pub fn as_ref(&self) -> Sparse<&T> {
        match self {
            Sparse::Present(v) => Sparse::Present(v),
            Sparse::Unavailable => Sparse::Unavailable,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Sparse<U> {
        match self {
            Sparse::Present(v) => Sparse::Present(f(v)),
            Sparse::Unavailable => Sparse::Unavailable,
        }
    }
}

impl<T> From<Option<T>> for Sparse<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Sparse::Unavailable, Sparse::Present)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unavailable() {
        let s: Sparse<Vec<f64>> = Sparse::default();
        assert!(s.is_unavailable());
        assert!(s.present().is_none());
    }

    #[test]
    fn present_empty_is_not_unavailable() {
        let s = Sparse::Present(Vec::<f64>::new());
        assert!(!s.is_unavailable());
        assert_eq!(s.present().map(Vec::len), Some(0));
    }

    #[test]
    fn option_conversion() {
        assert_eq!(Sparse::from(Some(3)), Sparse::Present(3));
        assert_eq!(Sparse::<i32>::from(None), Sparse::Unavailable);
        assert_eq!(Sparse::Present(2).map(|v| v * 2), Sparse::Present(4));
    }
}
