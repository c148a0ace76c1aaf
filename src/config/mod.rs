pub mod cli;
pub mod toml_config;

use crate::core::client::MAX_BATCH_SIZE;
use crate::core::{ConfigProvider, ExpandMode};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, validate_range,
    validate_url, Validate,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::time::Duration;

impl clap::ValueEnum for ExpandMode {
    fn value_variants<'a>() -> &'a [Self] {
        &[ExpandMode::Single, ExpandMode::Batch]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(match self {
            ExpandMode::Single => clap::builder::PossibleValue::new("single"),
            ExpandMode::Batch => clap::builder::PossibleValue::new("batch"),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "link-expander")]
#[command(about = "Expands shortened-link records through the bitly API into a CSV report")]
pub struct CliConfig {
    /// File of comma-delimited short-link records, one per line
    #[arg(long, default_value = "data/shortened_links")]
    pub input_path: String,

    /// Directory the CSV report is written to (must already exist)
    #[arg(long, default_value = "output")]
    pub output_path: String,

    #[arg(long, default_value = "bitly_expansions.csv")]
    pub output_file: String,

    #[arg(long, default_value = "https://api-ssl.bitly.com")]
    pub api_url: String,

    /// Substring identifying a relevant record; other lines are ignored
    #[arg(long, default_value = "bit.ly")]
    pub marker: String,

    /// Environment variable consulted first for the API token
    #[arg(long, default_value = "BITLY_TOKEN")]
    pub token_env: String,

    /// Fallback file holding the API token as its entire trimmed contents
    #[arg(long, default_value = "bitly_token")]
    pub token_file: String,

    #[arg(long, value_enum, default_value = "batch")]
    pub mode: ExpandMode,

    /// Hashes per batched expand call (the API accepts at most 15)
    #[arg(long, default_value_t = MAX_BATCH_SIZE)]
    pub batch_size: usize,

    /// Fixed delay in seconds before remote calls
    #[arg(long, default_value_t = 1)]
    pub politeness_secs: u64,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input_path
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_file(&self) -> &str {
        &self.output_file
    }

    fn api_url(&self) -> &str {
        &self.api_url
    }

    fn marker(&self) -> &str {
        &self.marker
    }

    fn token_env(&self) -> &str {
        &self.token_env
    }

    fn token_file(&self) -> &str {
        &self.token_file
    }

    fn mode(&self) -> ExpandMode {
        self.mode
    }

    fn batch_size(&self) -> usize {
        self.batch_size
    }

    fn politeness(&self) -> Duration {
        Duration::from_secs(self.politeness_secs)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> crate::utils::error::Result<()> {
        validate_url("api_url", &self.api_url)?;
        validate_path("input_path", &self.input_path)?;
        validate_path("output_path", &self.output_path)?;
        validate_non_empty_string("output_file", &self.output_file)?;
        validate_non_empty_string("marker", &self.marker)?;
        validate_non_empty_string("token_env", &self.token_env)?;
        validate_non_empty_string("token_file", &self.token_file)?;
        validate_positive_number("batch_size", self.batch_size, 1)?;
        validate_range("politeness_secs", self.politeness_secs, 0, 60)?;
        Ok(())
    }
}
