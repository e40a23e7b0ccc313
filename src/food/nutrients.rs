//! Nutrient lookup across the shapes a details payload can take.

use crate::dom::{coerce_finite_number, format_whole, PLACEHOLDER};
use serde_json::Value;

/// One normalized `(name, unit, value)` triple. Name and unit are lower-cased.
#[derive(Debug, Clone, PartialEq)]
pub struct NutrientEntry {
    pub name: String,
    pub unit: String,
    pub value: Option<f64>,
}

pub struct NutrientTarget {
    pub label: &'static str,
    /// Tried in order; each matches as a substring of the entry name.
    pub keywords: &'static [&'static str],
    pub default_unit: &'static str,
}

pub static NUTRIENT_TARGETS: [NutrientTarget; 7] = [
    NutrientTarget {
        label: "Calories",
        keywords: &["energy"],
        default_unit: "kcal",
    },
    NutrientTarget {
        label: "Protein",
        keywords: &["protein"],
        default_unit: "g",
    },
    NutrientTarget {
        label: "Carbs",
        keywords: &["carbohydrate"],
        default_unit: "g",
    },
    NutrientTarget {
        label: "Fat",
        keywords: &["total lipid", "fat"],
        default_unit: "g",
    },
    NutrientTarget {
        label: "Fiber",
        keywords: &["fiber"],
        default_unit: "g",
    },
    NutrientTarget {
        label: "Sugar",
        keywords: &["sugars"],
        default_unit: "g",
    },
    NutrientTarget {
        label: "Sodium",
        keywords: &["sodium"],
        default_unit: "mg",
    },
];

fn lower_text(value: Option<&Value>) -> Option<String> {
    value?.as_str().map(str::to_lowercase)
}

/// First non-null of the candidate fields, as a finite number.
fn first_value(candidates: [Option<&Value>; 2]) -> Option<f64> {
    candidates
        .into_iter()
        .flatten()
        .find(|v| !v.is_null())
        .and_then(|v| coerce_finite_number(Some(v)))
}

fn entry_from_list_item(item: &Value) -> NutrientEntry {
    let nested = item.get("nutrient");
    let name = lower_text(nested.and_then(|n| n.get("name")))
        .or_else(|| lower_text(item.get("nutrientName")))
        .unwrap_or_default();
    let unit = lower_text(nested.and_then(|n| n.get("unitName")))
        .or_else(|| lower_text(item.get("unitName")))
        .unwrap_or_default();

    NutrientEntry {
        name,
        unit,
        value: first_value([item.get("amount"), item.get("value")]),
    }
}

/// Normalizes the nutrient entries of a details payload.
///
/// Reads `foodNutrients` (each item either nested under `nutrient` or flat)
/// and, when that array is absent, the summarised `nutrients` object keyed
/// by nutrient name.
pub fn normalize_entries(details: &Value) -> Vec<NutrientEntry> {
    if let Some(items) = details.get("foodNutrients").and_then(Value::as_array) {
        return items.iter().map(entry_from_list_item).collect();
    }

    let Some(summary) = details.get("nutrients").and_then(Value::as_object) else {
        return Vec::new();
    };
    summary
        .iter()
        .map(|(name, item)| NutrientEntry {
            name: name.to_lowercase(),
            unit: lower_text(item.get("unit")).unwrap_or_default(),
            value: first_value([item.get("value"), item.get("amount")]),
        })
        .collect()
}

/// For each keyword in order, the first entry whose name contains it and
/// that carries a value.
pub fn find_nutrient<'a>(entries: &'a [NutrientEntry], keywords: &[&str]) -> Option<&'a NutrientEntry> {
    keywords.iter().find_map(|keyword| {
        let keyword = keyword.to_lowercase();
        entries
            .iter()
            .find(|entry| entry.name.contains(&keyword) && entry.value.is_some())
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct NutrientCard {
    pub label: &'static str,
    /// Rounded to the nearest whole number.
    pub value: Option<f64>,
    pub unit: String,
}

impl NutrientCard {
    pub fn text(&self) -> String {
        let value = self
            .value
            .map(format_whole)
            .unwrap_or_else(|| PLACEHOLDER.to_string());
        format!("{}: {} {}", self.label, value, self.unit)
    }
}

pub fn nutrient_card(entries: &[NutrientEntry], target: &NutrientTarget) -> NutrientCard {
    let found = find_nutrient(entries, target.keywords);
    let unit = found
        .map(|entry| entry.unit.as_str())
        .filter(|unit| !unit.is_empty())
        .unwrap_or(target.default_unit);

    NutrientCard {
        label: target.label,
        value: found.and_then(|entry| entry.value).map(f64::round),
        unit: unit.to_string(),
    }
}

/// One card per entry of [`NUTRIENT_TARGETS`], in that order.
pub fn nutrient_cards(details: &Value) -> Vec<NutrientCard> {
    let entries = normalize_entries(details);
    NUTRIENT_TARGETS
        .iter()
        .map(|target| nutrient_card(&entries, target))
        .collect()
}
