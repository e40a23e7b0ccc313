//! Remote diet-planner service endpoints
//!
//! Provides the request seam used by both flows: a reqwest-backed client for
//! the real service and a mock with canned responses for tests.

pub mod client;
pub mod mock;

pub use client::ApiClient;
pub use mock::MockApiClient;

use crate::models::{DietRequest, FoodSearchRequest};
use crate::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Each call resolves to the decoded JSON body on a 2xx status.
///
/// Non-2xx statuses surface as [`crate::Error::HttpStatus`] carrying the body
/// text; anything that stops the request completing is [`crate::Error::Http`].
#[async_trait]
pub trait PlannerApi: Send + Sync {
    /// `POST /diet/plan`
    async fn generate_plan(&self, request: &DietRequest) -> Result<Value>;
    /// `POST /food/search`
    async fn search_foods(&self, request: &FoodSearchRequest) -> Result<Value>;
    /// `GET /food/{id}`
    async fn food_details(&self, fdc_id: &str) -> Result<Value>;
}
