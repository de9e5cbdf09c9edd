//! Codec options, loadable from a YAML file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::JsonResult;
use crate::codec::SentinelPolicy;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecOptions {
    /// Which strings decode as unavailable data sets, tables and time series.
    pub sentinel_policy: SentinelPolicy,
    /// Pretty-print documents written to disk.
    pub pretty: bool,
    /// Drop table rows without cells when encoding.
    pub skip_empty_table_rows: bool,
    /// Validate streams on load and before save.
    pub validate: bool,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            sentinel_policy: SentinelPolicy::Strict,
            pretty: false,
            skip_empty_table_rows: true,
            validate: true,
        }
    }
}

impl CodecOptions {
    pub fn load_yaml(path: &Path) -> JsonResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let options = serde_yaml::from_str(&content)?;
        Ok(options)
    }

    pub fn save_yaml(&self, path: &Path) -> JsonResult<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
