use super::DownloadService;
use crate::Result;
use async_trait::async_trait;
use std::path::PathBuf;

/// Writes downloads into a local directory, creating it on first use.
pub struct DirectoryDownloads {
    dir: PathBuf,
}

impl DirectoryDownloads {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl DownloadService for DirectoryDownloads {
    async fn save(&self, file_name: &str, data: &[u8], content_type: &str) -> Result<String> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(file_name);
        tokio::fs::write(&path, data).await?;
        tracing::info!("Saved {} ({}) to {}", file_name, content_type, path.display());
        Ok(path.display().to_string())
    }
}
