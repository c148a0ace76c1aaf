pub mod client;
pub mod engine;
pub mod parser;
pub mod pipeline;
pub mod token;

pub use crate::domain::model::{ExpandReport, OutputRow, ShortLinkRecord};
pub use crate::domain::ports::{ConfigProvider, ExpandMode, Pipeline, Storage};
pub use crate::utils::error::Result;
