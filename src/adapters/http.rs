use crate::domain::ports::DocumentSource;
use crate::utils::error::{FitterError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Fetches catalog documents relative to an http(s) base URL.
pub struct HttpSource {
    base_url: String,
    client: Client,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>, timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;
        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    pub fn resource_url(&self, resource: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            resource.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl DocumentSource for HttpSource {
    async fn fetch(&self, resource: &str) -> Result<Vec<u8>> {
        let url = self.resource_url(resource);
        let response = self.client.get(&url).send().await?;

        tracing::debug!("GET {} -> {}", url, response.status());

        if !response.status().is_success() {
            return Err(FitterError::CatalogLoadError {
                resource: url,
                reason: format!("server responded with {}", response.status()),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }

    fn describe(&self, resource: &str) -> String {
        self.resource_url(resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_url_joins_slashes() {
        let source = HttpSource::new("https://cdn.example.com/data/", 5).unwrap();
        assert_eq!(
            source.resource_url("/modules.json"),
            "https://cdn.example.com/data/modules.json"
        );
        assert_eq!(
            source.resource_url("stats.json"),
            "https://cdn.example.com/data/stats.json"
        );
    }
}
