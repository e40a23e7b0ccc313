use super::PlannerApi;
use crate::models::{DietRequest, FoodSearchRequest};
use crate::{Error, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Canned outcome for one mocked call.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Json(Value),
    Status {
        status: u16,
        reason: String,
        body: String,
    },
    /// Stands in for a request that never completed.
    Unreachable(String),
}

impl MockResponse {
    fn into_result(self) -> Result<Value> {
        match self {
            MockResponse::Json(value) => Ok(value),
            MockResponse::Status {
                status,
                reason,
                body,
            } => Err(Error::HttpStatus {
                status,
                reason,
                body,
            }),
            MockResponse::Unreachable(message) => Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                message,
            ))),
        }
    }
}

#[derive(Clone, Default)]
pub struct MockApiClient {
    plan_responses: Arc<Mutex<VecDeque<MockResponse>>>,
    search_responses: Arc<Mutex<VecDeque<MockResponse>>>,
    details_responses: Arc<Mutex<VecDeque<MockResponse>>>,
    plan_requests: Arc<Mutex<Vec<DietRequest>>>,
    search_requests: Arc<Mutex<Vec<FoodSearchRequest>>>,
    details_requests: Arc<Mutex<Vec<String>>>,
}

impl MockApiClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_plan_response(self, response: MockResponse) -> Self {
        self.plan_responses.lock().unwrap().push_back(response);
        self
    }

    pub fn with_search_response(self, response: MockResponse) -> Self {
        self.search_responses.lock().unwrap().push_back(response);
        self
    }

    pub fn with_details_response(self, response: MockResponse) -> Self {
        self.details_responses.lock().unwrap().push_back(response);
        self
    }

    pub fn plan_requests(&self) -> Vec<DietRequest> {
        self.plan_requests.lock().unwrap().clone()
    }

    pub fn search_requests(&self) -> Vec<FoodSearchRequest> {
        self.search_requests.lock().unwrap().clone()
    }

    pub fn details_requests(&self) -> Vec<String> {
        self.details_requests.lock().unwrap().clone()
    }

    fn next(queue: &Mutex<VecDeque<MockResponse>>, endpoint: &str) -> Result<Value> {
        queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| MockResponse::Unreachable(format!("no mock response for {}", endpoint)))
            .into_result()
    }
}

#[async_trait]
impl PlannerApi for MockApiClient {
    async fn generate_plan(&self, request: &DietRequest) -> Result<Value> {
        self.plan_requests.lock().unwrap().push(request.clone());
        Self::next(&self.plan_responses, "/diet/plan")
    }

    async fn search_foods(&self, request: &FoodSearchRequest) -> Result<Value> {
        self.search_requests.lock().unwrap().push(request.clone());
        Self::next(&self.search_responses, "/food/search")
    }

    async fn food_details(&self, fdc_id: &str) -> Result<Value> {
        self.details_requests.lock().unwrap().push(fdc_id.to_string());
        Self::next(&self.details_responses, "/food/{id}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_mock_returns_responses_in_order() {
        let client = MockApiClient::new()
            .with_details_response(MockResponse::Json(json!({ "n": 1 })))
            .with_details_response(MockResponse::Json(json!({ "n": 2 })));

        assert_eq!(client.food_details("a").await.unwrap()["n"], json!(1));
        assert_eq!(client.food_details("b").await.unwrap()["n"], json!(2));
        assert_eq!(client.details_requests(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_mock_without_response_is_unreachable() {
        let client = MockApiClient::new();
        let request = FoodSearchRequest {
            query: "kiwi".to_string(),
            page_size: 5,
        };
        let err = client.search_foods(&request).await.unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(client.search_requests().len(), 1);
    }

    #[tokio::test]
    async fn test_mock_status_response() {
        let client = MockApiClient::new().with_plan_response(MockResponse::Status {
            status: 500,
            reason: "Internal Server Error".to_string(),
            body: "boom".to_string(),
        });
        let request = DietRequest {
            age: Some(40.0),
            height_cm: Some(160.0),
            weight_kg: Some(60.0),
            gender: "female".to_string(),
            activity_level: "sedentary".to_string(),
            goal: "maintain".to_string(),
            preferences: vec![],
        };
        let err = client.generate_plan(&request).await.unwrap_err();
        assert!(matches!(err, Error::HttpStatus { status: 500, .. }));
    }
}
