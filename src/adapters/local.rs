use crate::domain::ports::DocumentSource;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Reads catalog documents from a directory on disk.
#[derive(Debug, Clone)]
pub struct LocalSource {
    base_path: PathBuf,
}

impl LocalSource {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn full_path(&self, resource: &str) -> PathBuf {
        Path::new(&self.base_path).join(resource)
    }
}

#[async_trait]
impl DocumentSource for LocalSource {
    async fn fetch(&self, resource: &str) -> Result<Vec<u8>> {
        let data = tokio::fs::read(self.full_path(resource)).await?;
        Ok(data)
    }

    fn describe(&self, resource: &str) -> String {
        self.full_path(resource).display().to_string()
    }
}
