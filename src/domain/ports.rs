use crate::domain::model::{ExpandReport, ShortLinkRecord};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How identifiers are sent to the remote API: one request per hash
/// (plain-text responses) or grouped requests (JSON responses).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpandMode {
    Single,
    Batch,
}

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_file(&self) -> &str;
    fn api_url(&self) -> &str;
    fn marker(&self) -> &str;
    fn token_env(&self) -> &str;
    fn token_file(&self) -> &str;
    fn mode(&self) -> ExpandMode;
    fn batch_size(&self) -> usize;
    fn politeness(&self) -> Duration;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<ShortLinkRecord>>;
    async fn transform(&self, records: Vec<ShortLinkRecord>) -> Result<ExpandReport>;
    async fn load(&self, report: ExpandReport) -> Result<String>;
}
