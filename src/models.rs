//! Data models and structures
//!
//! Request payloads sent to the planner service, the goal vocabulary, and
//! runtime configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    Loss,
    Maintain,
    Gain,
}

impl Goal {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "loss" => Some(Self::Loss),
            "maintain" => Some(Self::Maintain),
            "gain" => Some(Self::Gain),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Loss => "loss",
            Self::Maintain => "maintain",
            Self::Gain => "gain",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Loss => "Lose weight",
            Self::Maintain => "Maintain",
            Self::Gain => "Gain muscle",
        }
    }
}

/// Display text for a raw goal value: the known label, else the raw string,
/// else the placeholder.
pub fn goal_label(raw: &str) -> String {
    if raw.is_empty() {
        return crate::dom::PLACEHOLDER.to_string();
    }
    Goal::parse(raw)
        .map(|g| g.label().to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Body of `POST /diet/plan`.
///
/// Numeric fields are `None` when the form input is not a finite number and
/// serialize as `null`. `goal` stays a string so values outside [`Goal`] are
/// passed through untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DietRequest {
    pub age: Option<f64>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub gender: String,
    pub activity_level: String,
    pub goal: String,
    pub preferences: Vec<String>,
}

/// Splits a comma separated preference field into trimmed, non-empty items.
pub fn parse_preferences(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub const DEFAULT_PAGE_SIZE: u32 = 5;

/// Body of `POST /food/search`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoodSearchRequest {
    pub query: String,
    pub page_size: u32,
}

/// Page size from form input.
///
/// Stricter than a plain parse: besides empty or unparseable input, values
/// below 1 also fall back to [`DEFAULT_PAGE_SIZE`], and fractions are
/// truncated (`2.5` is sent as `2`), so the request may differ from the raw
/// form text.
pub fn parse_page_size(raw: &str) -> u32 {
    crate::dom::parse_finite(raw)
        .filter(|n| *n >= 1.0 && *n <= f64::from(u32::MAX))
        .map(|n| n as u32)
        .unwrap_or(DEFAULT_PAGE_SIZE)
}

// Configuration
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub timeout: Option<Duration>,
    pub clipboard_command: Option<String>,
    pub download_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();

        let timeout = match std::env::var("DIET_API_TIMEOUT_SECS") {
            Ok(raw) => Some(Duration::from_secs(raw.trim().parse().map_err(|_| {
                crate::Error::Config(format!("DIET_API_TIMEOUT_SECS is not a number: {}", raw))
            })?)),
            Err(_) => None,
        };

        Ok(Self {
            base_url: std::env::var("DIET_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            timeout,
            clipboard_command: std::env::var("CLIPBOARD_COMMAND")
                .ok()
                .filter(|c| !c.trim().is_empty()),
            download_dir: std::env::var("DOWNLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
        })
    }
}
