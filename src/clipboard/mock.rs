use super::ClipboardService;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub struct MockClipboard {
    contents: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl MockClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every write fails, like a browser denying clipboard permission.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn writes(&self) -> Vec<String> {
        self.contents.lock().unwrap().clone()
    }
}

#[async_trait]
impl ClipboardService for MockClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        if self.fail {
            return Err(Error::Clipboard("permission denied".to_string()));
        }
        self.contents.lock().unwrap().push(text.to_string());
        Ok(())
    }
}
