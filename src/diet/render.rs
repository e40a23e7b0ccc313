//! Writes a normalized plan into the page regions.

use super::normalize::DietPlan;
use crate::dom::{format_whole, render_list, toggle_visible, Document, PLACEHOLDER};
use crate::models::goal_label;
use serde_json::Value;

/// Regions hidden while a request is pending and revealed on success.
pub const OUTPUT_REGIONS: [&str; 4] = ["#dietSummary", "#dietActions", "#mealSections", "#rawBlock"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            Self::Underweight
        } else if bmi < 25.0 {
            Self::Normal
        } else if bmi < 30.0 {
            Self::Overweight
        } else {
            Self::Obese
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Underweight => "Underweight",
            Self::Normal => "Normal",
            Self::Overweight => "Overweight",
            Self::Obese => "Obese",
        }
    }

    pub fn tag_class(&self) -> &'static str {
        match self {
            Self::Normal => "tag-ok",
            Self::Underweight | Self::Overweight => "tag-warn",
            Self::Obese => "tag-err",
        }
    }
}

/// Label and style class for an optional BMI; neutral placeholder when absent.
pub fn bmi_tag(bmi: Option<f64>) -> (&'static str, &'static str) {
    match bmi.map(BmiCategory::from_bmi) {
        Some(category) => (category.label(), category.tag_class()),
        None => (PLACEHOLDER, ""),
    }
}

/// Nearest integer as text, or the placeholder.
pub fn format_rounded(value: Option<f64>) -> String {
    match value {
        Some(v) => format_whole(v),
        None => PLACEHOLDER.to_string(),
    }
}

pub fn format_bmi(bmi: Option<f64>) -> String {
    match bmi {
        Some(v) => format!("{:.1}", v),
        None => PLACEHOLDER.to_string(),
    }
}

/// `BMR: n • TDEE: n` with whichever parts are known.
pub fn energy_line(bmr: Option<f64>, tdee: Option<f64>) -> String {
    let parts: Vec<String> = [("BMR", bmr), ("TDEE", tdee)]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| format!("{}: {}", name, format_whole(v))))
        .collect();

    if parts.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        parts.join(" • ")
    }
}

pub fn render_diet(doc: &mut Document, plan: &DietPlan, raw: &Value) {
    for region in OUTPUT_REGIONS {
        toggle_visible(doc.select_one(region), true);
    }

    let (tag_label, tag_class) = bmi_tag(plan.bmi);
    if let Some(el) = doc.select_one("#bmiValue") {
        el.set_text(format_bmi(plan.bmi));
    }
    if let Some(el) = doc.select_one("#bmiTag") {
        el.set_text(tag_label);
        el.set_class_name(&format!("mini-sub {}", tag_class));
    }

    if let Some(el) = doc.select_one("#calValue") {
        el.set_text(format_rounded(plan.daily_calories));
    }
    if let Some(el) = doc.select_one("#proValue") {
        el.set_text(format_rounded(plan.protein_g));
    }

    let goal = goal_label(doc.value_of("#goal"));
    if let Some(el) = doc.select_one("#goalValue") {
        el.set_text(goal);
    }
    if let Some(el) = doc.select_one("#tdeeLine") {
        el.set_text(energy_line(plan.bmr, plan.tdee));
    }

    let meal_regions = [
        "#mealBreakfast",
        "#mealLunch",
        "#mealDinner",
        "#mealSnacks",
        "#mealHydration",
    ];
    for (region, (_, items)) in meal_regions.into_iter().zip(plan.meals()) {
        render_list(doc.select_one(region), items);
    }
    render_list(doc.select_one("#mealNotes"), Some(plan.notes.as_slice()));

    let pretty = serde_json::to_string_pretty(raw).unwrap_or_else(|_| raw.to_string());
    if let Some(el) = doc.select_one("#dietRaw") {
        el.set_text(pretty);
    }
}
