pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::LocalStorage, toml_config::TomlConfig, CliConfig};
pub use core::{
    client::BitlyClient, engine::ExpandEngine, pipeline::ExpandPipeline, ExpandMode,
};
pub use utils::error::{ExpandError, Result};
