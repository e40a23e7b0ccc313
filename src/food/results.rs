//! Search result items and the clickable result list.

use crate::dom::{display_value, ClickAction, Document, Element};
use serde_json::Value;

pub const NO_RESULTS: &str = "No results found.";

#[derive(Debug, Clone, PartialEq)]
pub struct FoodItem {
    pub description: String,
    /// Opaque source identifier, rendered as text.
    pub fdc_id: String,
    pub data_type: Option<String>,
    pub brand_owner: Option<String>,
    pub food_category: Option<String>,
}

/// Non-empty text of a field; strings verbatim, other scalars as JSON.
pub(crate) fn text_field(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        other => Some(display_value(other)),
    }
}

/// Category given either as a string or as an object with a `description`.
pub(crate) fn category_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Object(obj) => text_field(obj.get("description")),
        other => text_field(Some(other)),
    }
}

impl FoodItem {
    pub fn from_value(value: &Value) -> Self {
        Self {
            description: text_field(value.get("description")).unwrap_or_else(|| "Item".to_string()),
            fdc_id: text_field(value.get("fdcId")).unwrap_or_default(),
            data_type: text_field(value.get("dataType")),
            brand_owner: text_field(value.get("brandOwner")),
            food_category: category_text(value.get("foodCategory")),
        }
    }

    pub fn is_branded(&self) -> bool {
        self.data_type
            .as_deref()
            .is_some_and(|dt| dt.to_lowercase() == "branded")
    }

    /// One-line label shown in the result list.
    pub fn summary(&self) -> String {
        let mut text = format!(
            "{} [{}] fdcId: {}",
            self.description,
            self.data_type.as_deref().unwrap_or("Food"),
            self.fdc_id
        );
        if let Some(brand) = &self.brand_owner {
            text.push_str(&format!(" • brand: {}", brand));
        }
        if let Some(category) = &self.food_category {
            text.push_str(&format!(" • {}", category));
        }
        text
    }
}

/// Items of the `results` array of a search response; empty when missing or
/// not an array.
pub fn parse_results(response: &Value) -> Vec<FoodItem> {
    response
        .get("results")
        .and_then(Value::as_array)
        .map(|items| items.iter().map(FoodItem::from_value).collect())
        .unwrap_or_default()
}

/// Applies the "common items only" filter, which drops branded products.
pub fn filter_results(items: Vec<FoodItem>, common_only: bool) -> Vec<FoodItem> {
    if !common_only {
        return items;
    }
    items.into_iter().filter(|item| !item.is_branded()).collect()
}

pub fn render_results(doc: &mut Document, items: &[FoodItem]) {
    let Some(list) = doc.select_one("#foodResults") else {
        return;
    };
    list.clear_children();

    if items.is_empty() {
        list.push_child(Element::entry(NO_RESULTS).with_class("list-item"));
        return;
    }

    for item in items {
        let mut entry = Element::entry(item.summary()).with_class("list-item");
        entry.on_click = Some(ClickAction::FoodDetails(item.fdc_id.clone()));
        list.push_child(entry);
    }
}
