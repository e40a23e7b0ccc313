//! Normalized view over the two accepted plan response shapes.

use crate::dom::{coerce_finite_number, display_value, json_list};
use serde_json::Value;

pub const DEFAULT_NOTE: &str = "General wellness guidance only.";

/// Where the plan fields of a response live.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DietResponseShape<'a> {
    /// Targets, meals and notes all sit at the root.
    Flat { root: &'a Value },
    /// Targets may sit at the root; meals and notes live under `ai_plan`.
    Nested { root: &'a Value, plan: &'a Value },
}

impl<'a> DietResponseShape<'a> {
    /// `Nested` whenever the root carries a non-null `ai_plan`.
    pub fn detect(response: &'a Value) -> Self {
        match response.get("ai_plan") {
            Some(plan) if !plan.is_null() => Self::Nested {
                root: response,
                plan,
            },
            _ => Self::Flat { root: response },
        }
    }

    pub fn root(&self) -> &'a Value {
        match *self {
            Self::Flat { root } | Self::Nested { root, .. } => root,
        }
    }

    /// Object holding meals and notes.
    pub fn plan(&self) -> &'a Value {
        match *self {
            Self::Flat { root } => root,
            Self::Nested { plan, .. } => plan,
        }
    }

    /// First finite value among `root.<root_key>` then `plan.<plan_key>` for
    /// each listed plan key in order.
    fn number(&self, root_key: &str, plan_keys: &[&str]) -> Option<f64> {
        let plan = self.plan();
        std::iter::once(self.root().get(root_key))
            .chain(plan_keys.iter().map(|key| plan.get(*key)))
            .find_map(coerce_finite_number)
    }
}

/// Plan fields resolved from a raw response. Computed fresh per render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DietPlan {
    pub bmi: Option<f64>,
    pub bmr: Option<f64>,
    pub tdee: Option<f64>,
    pub daily_calories: Option<f64>,
    pub protein_g: Option<f64>,
    pub breakfast: Option<Vec<String>>,
    pub lunch: Option<Vec<String>>,
    pub dinner: Option<Vec<String>>,
    pub snacks: Option<Vec<String>>,
    pub hydration: Option<Vec<String>>,
    pub notes: Vec<String>,
}

impl DietPlan {
    /// Resolves every field with this precedence:
    ///
    /// | field            | lookup order                                                      |
    /// |------------------|-------------------------------------------------------------------|
    /// | `bmi`            | root `bmi`, plan `bmi`                                            |
    /// | `bmr`            | root `bmr`, plan `bmr`                                            |
    /// | `tdee`           | root `tdee`, plan `tdee`                                          |
    /// | `daily_calories` | root `daily_calories_target`, plan `daily_calories`, plan `daily_calories_target` |
    /// | `protein_g`      | root `protein_target_g`, plan `protein_target_g`                  |
    /// | meal lists       | plan only                                                         |
    /// | `notes`          | plan `notes`, `tips`, `guidance`; root `disclaimer`; [`DEFAULT_NOTE`] |
    ///
    /// Numbers take the first finite candidate.
    pub fn from_response(response: &Value) -> Self {
        let shape = DietResponseShape::detect(response);
        let plan = shape.plan();

        Self {
            bmi: shape.number("bmi", &["bmi"]),
            bmr: shape.number("bmr", &["bmr"]),
            tdee: shape.number("tdee", &["tdee"]),
            daily_calories: shape.number(
                "daily_calories_target",
                &["daily_calories", "daily_calories_target"],
            ),
            protein_g: shape.number("protein_target_g", &["protein_target_g"]),
            breakfast: json_list(plan.get("breakfast")),
            lunch: json_list(plan.get("lunch")),
            dinner: json_list(plan.get("dinner")),
            snacks: json_list(plan.get("snacks")),
            hydration: json_list(plan.get("hydration")),
            notes: resolve_notes(&shape),
        }
    }

    /// Meal categories in display order.
    pub fn meals(&self) -> [(&'static str, Option<&[String]>); 5] {
        [
            ("Breakfast", self.breakfast.as_deref()),
            ("Lunch", self.lunch.as_deref()),
            ("Dinner", self.dinner.as_deref()),
            ("Snacks", self.snacks.as_deref()),
            ("Hydration", self.hydration.as_deref()),
        ]
    }
}

fn resolve_notes(shape: &DietResponseShape<'_>) -> Vec<String> {
    let plan = shape.plan();
    let found = ["notes", "tips", "guidance"]
        .iter()
        .filter_map(|key| plan.get(*key))
        .find(|value| !value.is_null());

    if let Some(notes) = found {
        return json_list(Some(notes)).unwrap_or_else(|| vec![display_value(notes)]);
    }

    match shape.root().get("disclaimer") {
        Some(disclaimer) if !disclaimer.is_null() => vec![display_value(disclaimer)],
        _ => vec![DEFAULT_NOTE.to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_detect_shape() {
        let flat = json!({ "bmi": 20 });
        assert!(matches!(
            DietResponseShape::detect(&flat),
            DietResponseShape::Flat { .. }
        ));

        let nested = json!({ "ai_plan": { "breakfast": [] } });
        assert!(matches!(
            DietResponseShape::detect(&nested),
            DietResponseShape::Nested { .. }
        ));

        let null_plan = json!({ "ai_plan": null, "breakfast": ["Toast"] });
        let shape = DietResponseShape::detect(&null_plan);
        assert!(matches!(shape, DietResponseShape::Flat { .. }));
        assert_eq!(shape.plan()["breakfast"], json!(["Toast"]));
    }

    #[test]
    fn test_flat_targets_with_nested_meals() {
        let response = json!({
            "bmi": 22.7,
            "daily_calories_target": 2100,
            "protein_target_g": 150,
            "ai_plan": {
                "breakfast": ["Oats"],
                "lunch": [],
                "dinner": ["Rice"],
                "snacks": [],
                "hydration": ["Water"]
            }
        });
        let plan = DietPlan::from_response(&response);

        assert_eq!(plan.bmi, Some(22.7));
        assert_eq!(plan.daily_calories, Some(2100.0));
        assert_eq!(plan.protein_g, Some(150.0));
        assert_eq!(plan.breakfast, Some(vec!["Oats".to_string()]));
        assert_eq!(plan.lunch, Some(vec![]));
        assert_eq!(plan.notes, vec![DEFAULT_NOTE.to_string()]);
    }

    #[test]
    fn test_nested_only_targets() {
        let response = json!({
            "ai_plan": { "daily_calories": 1800, "protein_target_g": 120, "breakfast": ["Eggs"] }
        });
        let plan = DietPlan::from_response(&response);

        assert_eq!(plan.bmi, None);
        assert_eq!(plan.daily_calories, Some(1800.0));
        assert_eq!(plan.protein_g, Some(120.0));
        assert_eq!(plan.breakfast, Some(vec!["Eggs".to_string()]));
        assert_eq!(plan.dinner, None);
    }

    #[test]
    fn test_non_finite_root_value_falls_back_to_plan() {
        let response = json!({
            "bmi": "n/a",
            "daily_calories_target": null,
            "ai_plan": { "bmi": 31.2, "daily_calories_target": "1950" }
        });
        let plan = DietPlan::from_response(&response);

        assert_eq!(plan.bmi, Some(31.2));
        assert_eq!(plan.daily_calories, Some(1950.0));
    }

    #[test]
    fn test_daily_calories_prefers_plan_daily_calories() {
        let response = json!({
            "ai_plan": { "daily_calories": 1700, "daily_calories_target": 1900 }
        });
        assert_eq!(DietPlan::from_response(&response).daily_calories, Some(1700.0));
    }

    #[test]
    fn test_notes_precedence() {
        let notes = json!({ "ai_plan": { "notes": ["Sleep"], "tips": ["Walk"] } });
        assert_eq!(DietPlan::from_response(&notes).notes, vec!["Sleep"]);

        let tips = json!({ "ai_plan": { "tips": "Walk daily" }, "disclaimer": "Not advice" });
        assert_eq!(DietPlan::from_response(&tips).notes, vec!["Walk daily"]);

        let guidance = json!({ "ai_plan": { "notes": null, "guidance": ["Eat greens"] } });
        assert_eq!(DietPlan::from_response(&guidance).notes, vec!["Eat greens"]);

        let disclaimer = json!({ "ai_plan": {}, "disclaimer": "Not medical advice." });
        assert_eq!(
            DietPlan::from_response(&disclaimer).notes,
            vec!["Not medical advice."]
        );
    }

    #[test]
    fn test_non_object_response_degrades() {
        let plan = DietPlan::from_response(&json!([1, 2, 3]));
        assert_eq!(plan.bmi, None);
        assert_eq!(plan.breakfast, None);
        assert_eq!(plan.notes, vec![DEFAULT_NOTE.to_string()]);
    }
}
