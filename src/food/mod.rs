//! Food search flow
//!
//! Searches the nutrition database, lists matches as clickable entries, and
//! loads the nutrient breakdown of a chosen item.

pub mod details;
pub mod nutrients;
pub mod results;

pub use details::{clear_details, details_title, render_details, DETAILS_PROMPT};
pub use nutrients::{
    find_nutrient, normalize_entries, nutrient_cards, NutrientCard, NutrientEntry, NUTRIENT_TARGETS,
};
pub use results::{filter_results, parse_results, render_results, FoodItem, NO_RESULTS};

use crate::api::PlannerApi;
use crate::dom::{set_status, toggle_visible, ClickAction, Document};
use crate::models::{parse_page_size, FoodSearchRequest};
use crate::Error;
use tracing::{info, warn};

pub const SEARCH_DONE: &str = "Search done ✅ (click an item for details)";

/// Search request plus the "common items only" flag, read from the form.
pub fn read_search_form(doc: &Document) -> (FoodSearchRequest, bool) {
    let request = FoodSearchRequest {
        query: doc.value_of("#foodQuery").to_string(),
        page_size: parse_page_size(doc.value_of("#pageSize")),
    };
    let common_only = doc.select("#commonOnly").is_some_and(|el| el.checked);
    (request, common_only)
}

/// Runs a search from the form and renders the result list.
///
/// An HTTP error only updates the status; the raw body is not surfaced here.
pub async fn search(doc: &mut Document, api: &dyn PlannerApi) {
    set_status(doc.select_one("#foodStatus"), "Searching...", true);
    clear_details(doc);

    let (request, common_only) = read_search_form(doc);
    info!(
        "Searching foods for '{}' (page size {}, common only: {})",
        request.query, request.page_size, common_only
    );

    match api.search_foods(&request).await {
        Ok(response) => {
            let items = filter_results(parse_results(&response), common_only);
            set_status(doc.select_one("#foodStatus"), SEARCH_DONE, true);
            render_results(doc, &items);
        }
        Err(e) => {
            warn!("Food search failed: {}", e);
            set_status(doc.select_one("#foodStatus"), &e.status_message(), false);
        }
    }
}

/// Source identifier behind the `index`-th result entry, if it is clickable.
pub fn result_target(doc: &Document, index: usize) -> Option<String> {
    let entry = doc.select("#foodResults")?.children.get(index)?;
    match entry.on_click.as_ref()? {
        ClickAction::FoodDetails(fdc_id) => Some(fdc_id.clone()),
    }
}

/// Loads and renders nutrient details for one item.
pub async fn fetch_details(doc: &mut Document, api: &dyn PlannerApi, fdc_id: &str) {
    set_status(doc.select_one("#foodStatus"), "Loading details...", true);
    clear_details(doc);
    info!("Loading food details for {}", fdc_id);

    match api.food_details(fdc_id).await {
        Ok(details) => {
            set_status(doc.select_one("#foodStatus"), "Details loaded ✅", true);
            render_details(doc, &details);
        }
        Err(Error::HttpStatus { status, body, .. }) => {
            warn!("Food details request failed with status {}", status);
            let message = format!("Error loading details: {}", status);
            set_status(doc.select_one("#foodStatus"), &message, false);
            toggle_visible(doc.select_one("#foodDetailsRaw"), true);
            if let Some(el) = doc.select_one("#foodDetailsRaw") {
                el.set_text(body);
            }
        }
        Err(e) => {
            warn!("Food details request did not complete: {}", e);
            set_status(doc.select_one("#foodStatus"), &e.status_message(), false);
        }
    }
}
