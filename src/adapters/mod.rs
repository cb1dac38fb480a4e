// Adapters layer: concrete document sources behind the DocumentSource port.

pub mod http;
pub mod local;

use crate::domain::ports::{CatalogConfig, DocumentSource};
use crate::utils::error::Result;
use async_trait::async_trait;

pub use http::HttpSource;
pub use local::LocalSource;

/// Source picked at runtime from the configured location.
pub enum CatalogSource {
    Http(HttpSource),
    Local(LocalSource),
}

impl CatalogSource {
    pub fn from_config<C: CatalogConfig>(config: &C) -> Result<Self> {
        let location = config.source();
        if location.starts_with("http://") || location.starts_with("https://") {
            Ok(CatalogSource::Http(HttpSource::new(
                location,
                config.timeout_seconds(),
            )?))
        } else {
            Ok(CatalogSource::Local(LocalSource::new(location)))
        }
    }
}

#[async_trait]
impl DocumentSource for CatalogSource {
    async fn fetch(&self, resource: &str) -> Result<Vec<u8>> {
        match self {
            CatalogSource::Http(source) => source.fetch(resource).await,
            CatalogSource::Local(source) => source.fetch(resource).await,
        }
    }

    fn describe(&self, resource: &str) -> String {
        match self {
            CatalogSource::Http(source) => source.describe(resource),
            CatalogSource::Local(source) => source.describe(resource),
        }
    }
}
