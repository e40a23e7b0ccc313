use super::DownloadService;
use crate::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub struct MockDownloads {
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    save_count: Arc<Mutex<usize>>,
}

impl MockDownloads {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_files(&self) -> HashMap<String, Vec<u8>> {
        self.files.lock().unwrap().clone()
    }

    pub fn get_save_count(&self) -> usize {
        *self.save_count.lock().unwrap()
    }
}

#[async_trait]
impl DownloadService for MockDownloads {
    async fn save(&self, file_name: &str, data: &[u8], _content_type: &str) -> Result<String> {
        *self.save_count.lock().unwrap() += 1;
        self.files
            .lock()
            .unwrap()
            .insert(file_name.to_string(), data.to_vec());
        Ok(format!("mock://{}", file_name))
    }
}
