use super::PlannerApi;
use crate::models::{DietRequest, FoodSearchRequest};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Builds a client for `base_url`. No timeout is applied unless one is
    /// given; a stalled request then waits indefinitely.
    pub fn new(base_url: String, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self::new_with_client(base_url, client))
    }

    pub fn new_with_client(base_url: String, client: Client) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_json<Req: Serialize + ?Sized>(&self, path: &str, request: &Req) -> Result<Value> {
        let url = self.url(path);
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send request to {}: {}", url, e);
                e
            })?;

        Self::decode(response).await
    }

    async fn get_json(&self, path: &str) -> Result<Value> {
        let url = self.url(path);
        tracing::debug!("GET {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::error!("Failed to send request to {}: {}", url, e);
            e
        })?;

        Self::decode(response).await
    }

    async fn decode(response: Response) -> Result<Value> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            tracing::warn!("API error (status {}): {}", status, body);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl PlannerApi for ApiClient {
    async fn generate_plan(&self, request: &DietRequest) -> Result<Value> {
        self.post_json("/diet/plan", request).await
    }

    async fn search_foods(&self, request: &FoodSearchRequest) -> Result<Value> {
        self.post_json("/food/search", request).await
    }

    async fn food_details(&self, fdc_id: &str) -> Result<Value> {
        let path = format!("/food/{}", urlencoding::encode(fdc_id));
        self.get_json(&path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Goal;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(server.uri(), None).unwrap()
    }

    fn diet_request() -> DietRequest {
        DietRequest {
            age: Some(30.0),
            height_cm: Some(180.0),
            weight_kg: Some(75.0),
            gender: "male".to_string(),
            activity_level: "moderate".to_string(),
            goal: Goal::Maintain.as_str().to_string(),
            preferences: vec!["vegetarian".to_string()],
        }
    }

    #[tokio::test]
    async fn test_generate_plan_posts_payload() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/diet/plan"))
            .and(body_json(json!({
                "age": 30.0,
                "height_cm": 180.0,
                "weight_kg": 75.0,
                "gender": "male",
                "activity_level": "moderate",
                "goal": "maintain",
                "preferences": ["vegetarian"]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "bmi": 23.1 })))
            .expect(1)
            .mount(&server)
            .await;

        let body = client_for(&server)
            .generate_plan(&diet_request())
            .await
            .unwrap();
        assert_eq!(body["bmi"], json!(23.1));
    }

    #[tokio::test]
    async fn test_non_success_status_carries_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/diet/plan"))
            .respond_with(ResponseTemplate::new(422).set_body_string("age must be positive"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .generate_plan(&diet_request())
            .await
            .unwrap_err();
        match err {
            Error::HttpStatus {
                status,
                reason,
                body,
            } => {
                assert_eq!(status, 422);
                assert_eq!(reason, "Unprocessable Entity");
                assert_eq!(body, "age must be positive");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_search_posts_query_and_page_size() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/food/search"))
            .and(body_json(json!({ "query": "apple", "page_size": 3 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
            .expect(1)
            .mount(&server)
            .await;

        let request = FoodSearchRequest {
            query: "apple".to_string(),
            page_size: 3,
        };
        let body = client_for(&server).search_foods(&request).await.unwrap();
        assert_eq!(body["results"], json!([]));
    }

    #[tokio::test]
    async fn test_details_escapes_identifier() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/food/a%2Fb%20c"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "description": "X" })))
            .expect(1)
            .mount(&server)
            .await;

        let body = client_for(&server).food_details("a/b c").await.unwrap();
        assert_eq!(body["description"], json!("X"));
    }

    #[tokio::test]
    async fn test_invalid_json_is_transport_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/food/1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server).food_details("1").await.unwrap_err();
        assert!(matches!(err, Error::Http(_)));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let client = ApiClient::new("http://127.0.0.1:9".to_string(), None).unwrap();
        let err = client.food_details("1").await.unwrap_err();
        assert!(matches!(err, Error::Http(_)));
    }
}
