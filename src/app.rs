//! Page controller wiring the flows to their services.

use crate::api::{ApiClient, PlannerApi};
use crate::clipboard::{ClipboardService, CommandClipboard};
use crate::diet::{self, CopyOutcome, DietFlow};
use crate::dom::Document;
use crate::download::{DirectoryDownloads, DownloadService};
use crate::food;
use crate::models::Config;
use crate::Result;
use tracing::info;

/// Owns the page document, the diet flow state, and the services every
/// handler talks to.
pub struct App {
    api: Box<dyn PlannerApi>,
    clipboard: Box<dyn ClipboardService>,
    downloads: Box<dyn DownloadService>,
    document: Document,
    diet: DietFlow,
}

/// Injectable service bundle used to construct [`App`] in tests/harnesses.
pub struct AppServices {
    pub api: Box<dyn PlannerApi>,
    pub clipboard: Box<dyn ClipboardService>,
    pub downloads: Box<dyn DownloadService>,
}

impl App {
    pub fn with_services(services: AppServices) -> Self {
        Self {
            api: services.api,
            clipboard: services.clipboard,
            downloads: services.downloads,
            document: Document::page(),
            diet: DietFlow::new(),
        }
    }

    /// Construct an app from environment configuration (`Config::from_env`).
    pub fn new() -> Result<Self> {
        let config = Config::from_env()?;
        Self::from_config(&config)
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        info!("Using planner service at {}", config.base_url);

        let api = ApiClient::new(config.base_url.clone(), config.timeout)?;
        Ok(Self::with_services(AppServices {
            api: Box::new(api),
            clipboard: Box::new(CommandClipboard::new(config.clipboard_command.clone())),
            downloads: Box::new(DirectoryDownloads::new(config.download_dir.clone())),
        }))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn last_diet_response(&self) -> Option<&serde_json::Value> {
        self.diet.last_response()
    }

    pub async fn submit_diet(&mut self) {
        self.diet.submit(&mut self.document, &*self.api).await;
    }

    pub async fn copy_plan(&self) -> Option<CopyOutcome> {
        diet::copy_plan(self.diet.last_response(), &*self.clipboard).await
    }

    pub async fn download_plan(&self) -> Result<Option<String>> {
        diet::download_plan(self.diet.last_response(), &*self.downloads).await
    }

    pub async fn submit_food_search(&mut self) {
        food::search(&mut self.document, &*self.api).await;
    }

    /// Activates the `index`-th result entry. Returns `false` when there is
    /// no clickable entry at that position.
    pub async fn click_result(&mut self, index: usize) -> bool {
        let Some(fdc_id) = food::result_target(&self.document, index) else {
            return false;
        };
        self.show_food_details(&fdc_id).await;
        true
    }

    pub async fn show_food_details(&mut self, fdc_id: &str) {
        food::fetch_details(&mut self.document, &*self.api, fdc_id).await;
    }
}
