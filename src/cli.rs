//! Command-line interface definitions and argument parsing

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::AnalysisConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Classify subscription customers and report revenue trends
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the transaction CSV
    #[arg(short, long, default_value = "subscription_report.csv")]
    pub input: PathBuf,

    /// Where to write the report
    #[arg(short, long, default_value = "output.txt")]
    pub output: PathBuf,

    /// JSON file overriding analysis settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Stop reading after this many transactions (0 reads everything)
    #[arg(long)]
    pub limit: Option<usize>,

    /// Report format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Last full year of data (overrides config)
    #[arg(long)]
    pub current_year: Option<i32>,

    /// Number of decreases and increases to report (overrides config)
    #[arg(short = 'k', long)]
    pub deltas: Option<usize>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Config file (or defaults) with command-line overrides applied
    pub fn analysis_config(&self) -> crate::Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::from_file(path)?,
            None => AnalysisConfig::default(),
        };

        if let Some(year) = self.current_year {
            config.current_year = year;
        }
        if let Some(count) = self.deltas {
            config.delta_count = count;
        }

        config.validate()?;
        Ok(config)
    }
}
