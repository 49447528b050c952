use crate::error::{EngineError, Result};
use crate::fuzzy::DEFAULT_CUTOFF;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Minimum similarity for the fuzzy fallback, in `0.0..=1.0`.
    pub fuzzy_cutoff: f64,
    /// Cap on index keys compared per unmatched query term. `None` scans them all.
    pub max_fuzzy_keys: Option<usize>,
    pub remove_stopwords: bool,
    pub highlight_open: String,
    pub highlight_close: String,
    /// Sense file to load instead of the embedded inventory.
    pub senses_path: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fuzzy_cutoff: DEFAULT_CUTOFF,
            max_fuzzy_keys: None,
            remove_stopwords: false,
            highlight_open: "*".into(),
            highlight_close: "*".into(),
            senses_path: None,
        }
    }
}

impl EngineConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let config: EngineConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.fuzzy_cutoff) {
            return Err(EngineError::InvalidConfig(format!(
                "fuzzy_cutoff must be within 0.0..=1.0, got {}",
                self.fuzzy_cutoff
            )));
        }
        if self.max_fuzzy_keys == Some(0) {
            return Err(EngineError::InvalidConfig("max_fuzzy_keys must be positive".into()));
        }
        Ok(())
    }
}
