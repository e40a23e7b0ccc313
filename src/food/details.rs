//! Nutrient detail panel.

use super::nutrients::nutrient_cards;
use super::results::{category_text, text_field};
use crate::dom::{toggle_visible, Document, Element};
use serde_json::Value;

pub const DETAILS_PROMPT: &str = "Click a result to view nutrients";

/// `description • dataType • category`, skipping absent parts.
pub fn details_title(details: &Value) -> String {
    let description = details
        .get("description")
        .filter(|v| !v.is_null())
        .map(crate::dom::display_value)
        .unwrap_or_else(|| "Food".to_string());

    let mut title = description;
    for part in [
        text_field(details.get("dataType")),
        category_text(details.get("foodCategory")),
    ]
    .into_iter()
    .flatten()
    {
        title.push_str(" • ");
        title.push_str(&part);
    }
    title
}

/// Resets the panel to its empty state with the debug block hidden.
pub fn clear_details(doc: &mut Document) {
    if let Some(el) = doc.select_one("#foodTitle") {
        el.set_text(DETAILS_PROMPT);
    }
    if let Some(el) = doc.select_one("#nutriGrid") {
        el.clear_children();
    }
    toggle_visible(doc.select_one("#foodDetailsRaw"), false);
    if let Some(el) = doc.select_one("#foodDetailsRaw") {
        el.set_text("");
    }
}

/// Fills the title and card grid. The raw payload is written to the debug
/// block, which stays hidden.
pub fn render_details(doc: &mut Document, details: &Value) {
    if let Some(el) = doc.select_one("#foodTitle") {
        el.set_text(details_title(details));
    }

    if let Some(grid) = doc.select_one("#nutriGrid") {
        grid.clear_children();
        for card in nutrient_cards(details) {
            grid.push_child(Element::entry(card.text()).with_class("nutri-item"));
        }
    }

    let pretty = serde_json::to_string_pretty(details).unwrap_or_else(|_| details.to_string());
    if let Some(el) = doc.select_one("#foodDetailsRaw") {
        el.set_text(pretty);
    }
}
