//! Clipboard access for the copy-plan action

pub mod command;
pub mod mock;

pub use command::CommandClipboard;
pub use mock::MockClipboard;

use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ClipboardService: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<()>;
}
