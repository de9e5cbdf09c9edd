//! Observation payload shapes, one per representation.

use indexmap::IndexMap;
use indexmap::map::Entry;
use mtc_core::{MtcResult, Real, Representation, Scalar, ensure_finite};

use crate::sparse::Sparse;

/// Ordered key to scalar entries of a DATA_SET observation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataSet {
    entries: IndexMap<String, Scalar>,
}

impl DataSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from already classified entries. The first occurrence of a key wins.
    pub fn from_entries<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Scalar)>,
    {
        let mut set = Self::new();
        for (key, value) in entries {
            set.insert_first(key.into(), value);
        }
        set
    }

    /// Build from raw text values, classifying each one with [`Scalar::parse`].
    pub fn from_text_entries<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::from_entries(
            entries
                .into_iter()
                .map(|(k, v)| (k, Scalar::parse(v.as_ref()))),
        )
    }

    /// Insert unless the key is already present. Returns whether it was inserted.
    pub fn insert_first(&mut self, key: String, value: Scalar) -> bool {
        match self.entries.entry(key) {
            Entry::Occupied(occupied) => {
                tracing::debug!(key = %occupied.key(), "duplicate data set key ignored");
                false
            }
            Entry::Vacant(vacant) => {
                vacant.insert(value);
                true
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Scalar> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Ordered key to row entries of a TABLE observation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    rows: IndexMap<String, DataSet>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from rows. The first occurrence of a row key wins.
    pub fn from_rows<K, I>(rows: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, DataSet)>,
    {
        let mut table = Self::new();
        for (key, row) in rows {
            table.insert_first(key.into(), row);
        }
        table
    }

    pub fn insert_first(&mut self, key: String, row: DataSet) -> bool {
        match self.rows.entry(key) {
            Entry::Occupied(occupied) => {
                tracing::debug!(key = %occupied.key(), "duplicate table row ignored");
                false
            }
            Entry::Vacant(vacant) => {
                vacant.insert(row);
                true
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&DataSet> {
        self.rows.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DataSet)> {
        self.rows.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Sampled waveform of a TIME_SERIES observation. Order is significant.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimeSeries {
    samples: Vec<Real>,
}

impl TimeSeries {
    /// Rejects NaN and infinities, which have no JSON number form.
    pub fn new(samples: Vec<Real>) -> MtcResult<Self> {
        for &v in &samples {
            ensure_finite(v, "time series sample")?;
        }
        Ok(Self { samples })
    }

    pub fn samples(&self) -> &[Real] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Observation payload tagged by representation.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Value(Sparse<Scalar>),
    DataSet(Sparse<DataSet>),
    Table(Sparse<Table>),
    TimeSeries(Sparse<TimeSeries>),
}

impl Payload {
    /// Unavailable payload for the given representation.
    pub fn unavailable(representation: Representation) -> Self {
        match representation {
            Representation::Value => Payload::Value(Sparse::Unavailable),
            Representation::DataSet => Payload::DataSet(Sparse::Unavailable),
            Representation::Table => Payload::Table(Sparse::Unavailable),
            Representation::TimeSeries => Payload::TimeSeries(Sparse::Unavailable),
        }
    }

    pub fn representation(&self) -> Representation {
        match self {
            Payload::Value(_) => Representation::Value,
            Payload::DataSet(_) => Representation::DataSet,
            Payload::Table(_) => Representation::Table,
            Payload::TimeSeries(_) => Representation::TimeSeries,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        match self {
            Payload::Value(v) => v.is_unavailable(),
            Payload::DataSet(v) => v.is_unavailable(),
            Payload::Table(v) => v.is_unavailable(),
            Payload::TimeSeries(v) => v.is_unavailable(),
        }
    }
}

impl From<Scalar> for Payload {
    fn from(value: Scalar) -> Self {
        Payload::Value(Sparse::Present(value))
    }
}

impl From<DataSet> for Payload {
    fn from(value: DataSet) -> Self {
        Payload::DataSet(Sparse::Present(value))
    }
}

impl From<Table> for Payload {
    fn from(value: Table) -> Self {
        Payload::Table(Sparse::Present(value))
    }
}

impl From<TimeSeries> for Payload {
    fn from(value: TimeSeries) -> Self {
        Payload::TimeSeries(Sparse::Present(value))
    }
}
