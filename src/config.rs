// ⚙️ Analysis Configuration
// Year range, reference year and ranking size as data, overridable from JSON

use anyhow::{bail, Context as AnyhowContext, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_BASE_YEAR: i32 = 1966;
pub const DEFAULT_YEAR_SPAN: usize = 49;
pub const DEFAULT_CURRENT_YEAR: i32 = 2014;
pub const DEFAULT_DELTA_COUNT: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// First year held by the annual revenue table
    pub base_year: i32,

    /// Number of yearly slots in the revenue table
    pub year_span: usize,

    /// Last full year of data; predictions target the year after
    pub current_year: i32,

    /// How many decreases (and increases) the ranker reports
    pub delta_count: usize,

    pub days_per_year: i64,
    pub months_per_year: i64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            base_year: DEFAULT_BASE_YEAR,
            year_span: DEFAULT_YEAR_SPAN,
            current_year: DEFAULT_CURRENT_YEAR,
            delta_count: DEFAULT_DELTA_COUNT,
            days_per_year: 365,
            months_per_year: 12,
        }
    }
}

impl AnalysisConfig {
    /// Load config from JSON file; missing fields keep their defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: AnalysisConfig =
            serde_json::from_str(&content).context("Failed to parse config JSON")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the ranker and revenue table cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.delta_count == 0 {
            bail!("delta_count must be at least 1");
        }
        if self.year_span <= self.delta_count {
            bail!(
                "year_span {} too short to rank {} deltas",
                self.year_span,
                self.delta_count
            );
        }
        Ok(())
    }
}
