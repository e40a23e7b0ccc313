//! Client for a diet-planning service
//!
//! Submits biometric forms for a generated diet plan, searches a nutrition
//! database, and renders the responses into a headless page model that the
//! CLI prints.

pub mod api;
pub mod app;
pub mod clipboard;
pub mod diet;
pub mod dom;
pub mod download;
pub mod error;
pub mod food;
pub mod models;

pub use error::{Error, Result};
