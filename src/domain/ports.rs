use crate::utils::error::Result;
use async_trait::async_trait;

/// Where catalog documents come from.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn fetch(&self, resource: &str) -> Result<Vec<u8>>;

    /// Human-readable location used in log lines.
    fn describe(&self, resource: &str) -> String;
}

pub trait CatalogConfig: Send + Sync {
    fn source(&self) -> &str;
    fn modules_resource(&self) -> &str;
    fn stats_resource(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
}
