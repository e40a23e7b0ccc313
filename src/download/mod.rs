//! Saving files produced by the client, such as `diet_plan.json`

pub mod directory;
pub mod mock;

pub use directory::DirectoryDownloads;
pub use mock::MockDownloads;

use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait DownloadService: Send + Sync {
    /// Saves `data` under `file_name` and returns where it landed.
    async fn save(&self, file_name: &str, data: &[u8], content_type: &str) -> Result<String>;
}
