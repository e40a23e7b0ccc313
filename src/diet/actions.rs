//! Copy and download actions over the last successful plan response.

use super::normalize::DietPlan;
use super::render::format_rounded;
use crate::clipboard::ClipboardService;
use crate::download::DownloadService;
use crate::Result;
use serde_json::Value;

pub const DOWNLOAD_FILE_NAME: &str = "diet_plan.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    Failed,
}

impl CopyOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Copied => "Copied ✅",
            Self::Failed => "Copy failed (clipboard unavailable).",
        }
    }
}

/// Plain-text summary of a plan as written to the clipboard.
pub fn plan_summary(plan: &DietPlan) -> String {
    let mut lines: Vec<String> = vec!["AI Diet Plan".to_string(), "----------".to_string()];

    if let Some(bmi) = plan.bmi {
        lines.push(format!("BMI: {:.1}", bmi));
    }
    if plan.daily_calories.is_some() {
        lines.push(format!("Daily Calories: {} kcal", format_rounded(plan.daily_calories)));
    }
    if plan.protein_g.is_some() {
        lines.push(format!("Protein Target: {} g", format_rounded(plan.protein_g)));
    }
    lines.push(String::new());

    for (title, items) in plan.meals() {
        let Some(items) = items.filter(|items| !items.is_empty()) else {
            continue;
        };
        lines.push(title.to_string());
        lines.extend(items.iter().map(|item| format!("- {}", item)));
        lines.push(String::new());
    }

    lines.join("\n")
}

/// Writes the summary of `last_response` to the clipboard. `None` when no
/// plan has been received yet.
pub async fn copy_plan(
    last_response: Option<&Value>,
    clipboard: &dyn ClipboardService,
) -> Option<CopyOutcome> {
    let response = last_response?;
    let text = plan_summary(&DietPlan::from_response(response));

    let outcome = match clipboard.write_text(&text).await {
        Ok(()) => CopyOutcome::Copied,
        Err(e) => {
            tracing::warn!("Failed to copy plan: {}", e);
            CopyOutcome::Failed
        }
    };
    Some(outcome)
}

/// Saves `last_response` as pretty JSON named [`DOWNLOAD_FILE_NAME`] and
/// returns its location. `None` when no plan has been received yet.
pub async fn download_plan(
    last_response: Option<&Value>,
    downloads: &dyn DownloadService,
) -> Result<Option<String>> {
    let Some(response) = last_response else {
        return Ok(None);
    };
    let json = serde_json::to_string_pretty(response)?;
    let location = downloads
        .save(DOWNLOAD_FILE_NAME, json.as_bytes(), "application/json")
        .await?;
    Ok(Some(location))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MockClipboard;
    use crate::download::MockDownloads;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample_response() -> Value {
        json!({
            "bmi": 22.66,
            "daily_calories_target": 2099.6,
            "protein_target_g": 150,
            "ai_plan": {
                "breakfast": ["Oats", "Berries"],
                "lunch": [],
                "dinner": ["Rice"],
                "hydration": ["Water"]
            }
        })
    }

    #[test]
    fn test_plan_summary_layout() {
        let plan = DietPlan::from_response(&sample_response());
        let expected = [
            "AI Diet Plan",
            "----------",
            "BMI: 22.7",
            "Daily Calories: 2100 kcal",
            "Protein Target: 150 g",
            "",
            "Breakfast",
            "- Oats",
            "- Berries",
            "",
            "Dinner",
            "- Rice",
            "",
            "Hydration",
            "- Water",
            "",
        ]
        .join("\n");
        assert_eq!(plan_summary(&plan), expected);
    }

    #[test]
    fn test_plan_summary_skips_missing_targets() {
        let plan = DietPlan::from_response(&json!({ "ai_plan": {} }));
        assert_eq!(plan_summary(&plan), "AI Diet Plan\n----------\n");
    }

    #[tokio::test]
    async fn test_copy_without_response_is_noop() {
        let clipboard = MockClipboard::new();
        assert_eq!(copy_plan(None, &clipboard).await, None);
        assert!(clipboard.writes().is_empty());
    }

    #[tokio::test]
    async fn test_copy_writes_summary() {
        let clipboard = MockClipboard::new();
        let response = sample_response();

        let outcome = copy_plan(Some(&response), &clipboard).await;

        assert_eq!(outcome, Some(CopyOutcome::Copied));
        let writes = clipboard.writes();
        assert_eq!(writes.len(), 1);
        assert!(writes[0].starts_with("AI Diet Plan\n"));
    }

    #[tokio::test]
    async fn test_copy_reports_failure() {
        let clipboard = MockClipboard::failing();
        let response = sample_response();
        let outcome = copy_plan(Some(&response), &clipboard).await;
        assert_eq!(outcome, Some(CopyOutcome::Failed));
        assert_eq!(CopyOutcome::Failed.message(), "Copy failed (clipboard unavailable).");
    }

    #[tokio::test]
    async fn test_download_saves_pretty_json() {
        let downloads = MockDownloads::new();
        let response = sample_response();

        let location = download_plan(Some(&response), &downloads).await.unwrap();

        assert_eq!(location.as_deref(), Some("mock://diet_plan.json"));
        let files = downloads.get_files();
        let saved = String::from_utf8(files["diet_plan.json"].clone()).unwrap();
        assert_eq!(saved, serde_json::to_string_pretty(&response).unwrap());
    }

    #[tokio::test]
    async fn test_download_without_response_is_noop() {
        let downloads = MockDownloads::new();
        assert_eq!(download_plan(None, &downloads).await.unwrap(), None);
        assert_eq!(downloads.get_save_count(), 0);
    }
}
