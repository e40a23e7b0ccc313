//! Diet plan flow
//!
//! Reads the biometric form, requests a plan, and renders the normalized
//! result. The last successful response is kept here and handed to the copy
//! and download actions.

pub mod actions;
pub mod normalize;
pub mod render;

pub use actions::{copy_plan, download_plan, plan_summary, CopyOutcome, DOWNLOAD_FILE_NAME};
pub use normalize::{DietPlan, DietResponseShape, DEFAULT_NOTE};
pub use render::{render_diet, BmiCategory, OUTPUT_REGIONS};

use crate::api::PlannerApi;
use crate::dom::{parse_finite, set_status, toggle_visible, Document};
use crate::models::{parse_preferences, DietRequest};
use crate::Error;
use serde_json::Value;
use tracing::{info, warn};

#[derive(Debug, Default)]
pub struct DietFlow {
    last_response: Option<Value>,
}

impl DietFlow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent successful response. Stale while a newer request is in
    /// flight; only replaced when that request succeeds.
    pub fn last_response(&self) -> Option<&Value> {
        self.last_response.as_ref()
    }

    pub fn read_form(doc: &Document) -> DietRequest {
        DietRequest {
            age: parse_finite(doc.value_of("#age")),
            height_cm: parse_finite(doc.value_of("#height_cm")),
            weight_kg: parse_finite(doc.value_of("#weight_kg")),
            gender: doc.value_of("#gender").to_string(),
            activity_level: doc.value_of("#activity_level").to_string(),
            goal: doc.value_of("#goal").to_string(),
            preferences: parse_preferences(doc.value_of("#preferences")),
        }
    }

    /// Submits the form and re-renders the diet regions from the outcome.
    ///
    /// Overlapping submissions are not correlated: whichever completes last
    /// owns the regions.
    pub async fn submit(&mut self, doc: &mut Document, api: &dyn PlannerApi) {
        set_status(doc.select_one("#dietStatus"), "Generating plan...", true);
        for region in OUTPUT_REGIONS {
            toggle_visible(doc.select_one(region), false);
        }

        let request = Self::read_form(doc);
        info!("Requesting diet plan (goal: {})", request.goal);

        match api.generate_plan(&request).await {
            Ok(response) => {
                set_status(doc.select_one("#dietStatus"), "Success ✅", true);
                let plan = DietPlan::from_response(&response);
                render_diet(doc, &plan, &response);
                self.last_response = Some(response);
            }
            Err(Error::HttpStatus {
                status,
                reason,
                body,
            }) => {
                warn!("Diet plan request failed with status {}", status);
                let message = format!("Error: {} {}", status, reason);
                set_status(doc.select_one("#dietStatus"), &message, false);
                toggle_visible(doc.select_one("#rawBlock"), true);
                if let Some(el) = doc.select_one("#dietRaw") {
                    el.set_text(body);
                }
            }
            Err(e) => {
                warn!("Diet plan request did not complete: {}", e);
                set_status(doc.select_one("#dietStatus"), &e.status_message(), false);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{MockApiClient, MockResponse};
    use crate::dom::ERR_CLASS;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn filled_page() -> Document {
        let mut doc = Document::page();
        doc.set_value("#age", "30");
        doc.set_value("#height_cm", "180");
        doc.set_value("#weight_kg", "75.5");
        doc.set_value("#gender", "male");
        doc.set_value("#activity_level", "moderate");
        doc.set_value("#goal", "gain");
        doc.set_value("#preferences", "high protein, , no dairy");
        doc
    }

    #[test]
    fn test_read_form() {
        let request = DietFlow::read_form(&filled_page());
        assert_eq!(
            request,
            DietRequest {
                age: Some(30.0),
                height_cm: Some(180.0),
                weight_kg: Some(75.5),
                gender: "male".to_string(),
                activity_level: "moderate".to_string(),
                goal: "gain".to_string(),
                preferences: vec!["high protein".to_string(), "no dairy".to_string()],
            }
        );
    }

    #[test]
    fn test_read_form_unparseable_numbers() {
        let mut doc = filled_page();
        doc.set_value("#age", "thirty");
        assert_eq!(DietFlow::read_form(&doc).age, None);
    }

    #[tokio::test]
    async fn test_submit_success_renders_and_stores() {
        let api = MockApiClient::new().with_plan_response(MockResponse::Json(json!({
            "bmi": 23.3,
            "ai_plan": { "breakfast": ["Oats"] }
        })));
        let mut doc = filled_page();
        let mut flow = DietFlow::new();

        flow.submit(&mut doc, &api).await;

        assert_eq!(doc.text_of("#dietStatus"), "Success ✅");
        assert_eq!(doc.text_of("#goalValue"), "Gain muscle");
        assert!(doc.is_visible("#dietSummary"));
        assert_eq!(flow.last_response().unwrap()["bmi"], json!(23.3));
        assert_eq!(api.plan_requests().len(), 1);
    }

    #[tokio::test]
    async fn test_submit_http_error_shows_raw_body_only() {
        let api = MockApiClient::new().with_plan_response(MockResponse::Status {
            status: 503,
            reason: "Service Unavailable".to_string(),
            body: "model overloaded".to_string(),
        });
        let mut doc = filled_page();
        let mut flow = DietFlow::new();

        flow.submit(&mut doc, &api).await;

        let status = doc.select("#dietStatus").unwrap();
        assert_eq!(status.text, "Error: 503 Service Unavailable");
        assert!(status.has_class(ERR_CLASS));
        assert!(doc.is_visible("#rawBlock"));
        assert_eq!(doc.text_of("#dietRaw"), "model overloaded");
        assert!(!doc.is_visible("#dietSummary"));
        assert!(!doc.is_visible("#dietActions"));
        assert!(!doc.is_visible("#mealSections"));
        assert!(flow.last_response().is_none());
    }

    #[tokio::test]
    async fn test_submit_transport_error_keeps_regions_hidden() {
        let api = MockApiClient::new()
            .with_plan_response(MockResponse::Unreachable("connection refused".to_string()));
        let mut doc = filled_page();
        let mut flow = DietFlow::new();

        flow.submit(&mut doc, &api).await;

        let status = doc.text_of("#dietStatus");
        assert!(status.starts_with("Network/Server error: "));
        assert!(status.contains("connection refused"));
        for region in OUTPUT_REGIONS {
            assert!(!doc.is_visible(region));
        }
    }

    #[tokio::test]
    async fn test_failed_resubmit_hides_previous_output_but_keeps_last_response() {
        let api = MockApiClient::new()
            .with_plan_response(MockResponse::Json(json!({ "bmi": 20.0 })))
            .with_plan_response(MockResponse::Unreachable("offline".to_string()));
        let mut doc = filled_page();
        let mut flow = DietFlow::new();

        flow.submit(&mut doc, &api).await;
        assert!(doc.is_visible("#dietSummary"));

        flow.submit(&mut doc, &api).await;
        assert!(!doc.is_visible("#dietSummary"));
        assert_eq!(flow.last_response().unwrap()["bmi"], json!(20.0));
    }
}
