use crate::core::client::MAX_BATCH_SIZE;
use crate::core::{ConfigProvider, ExpandMode};
use crate::utils::error::{ExpandError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, validate_range,
    validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// TOML front-end for the same settings the CLI flags expose.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub pipeline: Option<PipelineConfig>,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub name: String,
    pub description: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_input_path")]
    pub path: String,
    #[serde(default = "default_marker")]
    pub marker: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_url")]
    pub base_url: String,
    #[serde(default = "default_mode")]
    pub mode: ExpandMode,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_politeness_secs")]
    pub politeness_secs: u64,
    #[serde(default = "default_token_env")]
    pub token_env: String,
    #[serde(default = "default_token_file")]
    pub token_file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: String,
    #[serde(default = "default_output_file")]
    pub filename: String,
}

fn default_input_path() -> String {
    "data/shortened_links".to_string()
}

fn default_marker() -> String {
    "bit.ly".to_string()
}

fn default_api_url() -> String {
    "https://api-ssl.bitly.com".to_string()
}

fn default_mode() -> ExpandMode {
    ExpandMode::Batch
}

fn default_batch_size() -> usize {
    MAX_BATCH_SIZE
}

fn default_politeness_secs() -> u64 {
    1
}

fn default_token_env() -> String {
    "BITLY_TOKEN".to_string()
}

fn default_token_file() -> String {
    "bitly_token".to_string()
}

fn default_output_path() -> String {
    "output".to_string()
}

fn default_output_file() -> String {
    "bitly_expansions.csv".to_string()
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: default_input_path(),
            marker: default_marker(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_url(),
            mode: default_mode(),
            batch_size: default_batch_size(),
            politeness_secs: default_politeness_secs(),
            token_env: default_token_env(),
            token_file: default_token_file(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            filename: default_output_file(),
        }
    }
}

impl TomlConfig {
    pub fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ExpandError::ConfigError {
            message: format!("cannot read config file {}: {}", path, e),
        })?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| ExpandError::ConfigError {
            message: format!("invalid TOML config: {}", e),
        })
    }

    pub fn summary(&self) -> String {
        let name = self
            .pipeline
            .as_ref()
            .map(|p| p.name.as_str())
            .unwrap_or("bitly-expansion");
        format!(
            "{}: {} -> {}/{} via {} ({:?} mode, batch {}, politeness {}s)",
            name,
            self.input.path,
            self.output.path,
            self.output.filename,
            self.api.base_url,
            self.api.mode,
            self.api.batch_size,
            self.api.politeness_secs,
        )
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> &str {
        &self.input.path
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn output_file(&self) -> &str {
        &self.output.filename
    }

    fn api_url(&self) -> &str {
        &self.api.base_url
    }

    fn marker(&self) -> &str {
        &self.input.marker
    }

    fn token_env(&self) -> &str {
        &self.api.token_env
    }

    fn token_file(&self) -> &str {
        &self.api.token_file
    }

    fn mode(&self) -> ExpandMode {
        self.api.mode
    }

    fn batch_size(&self) -> usize {
        self.api.batch_size
    }

    fn politeness(&self) -> Duration {
        Duration::from_secs(self.api.politeness_secs)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api.base_url", &self.api.base_url)?;
        validate_path("input.path", &self.input.path)?;
        validate_path("output.path", &self.output.path)?;
        validate_non_empty_string("output.filename", &self.output.filename)?;
        validate_non_empty_string("input.marker", &self.input.marker)?;
        validate_non_empty_string("api.token_env", &self.api.token_env)?;
        validate_non_empty_string("api.token_file", &self.api.token_file)?;
        validate_positive_number("api.batch_size", self.api.batch_size, 1)?;
        validate_range("api.politeness_secs", self.api.politeness_secs, 0, 60)?;
        Ok(())
    }
}
