//! Prediction parameter bag.
//!
//! Callers pass a loose set of options; unknown keys are ignored and missing
//! ones fall back to their defaults.

use anyhow::{Context, Result};
use pipeline::filters::DEFAULT_SIM_THRESHOLD_PERCENT;
use serde::{Deserialize, Serialize};

/// Options recognized by [`crate::RecommendationDispatcher::predict`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictParams {
    /// Minimum similarity as a percentage (0 - 100)
    pub sim_threshold: f64,
    /// Cap on recommendations per user; no cap when absent
    pub top_courses: Option<usize>,
}

impl Default for PredictParams {
    fn default() -> Self {
        Self {
            sim_threshold: DEFAULT_SIM_THRESHOLD_PERCENT,
            top_courses: None,
        }
    }
}

impl PredictParams {
    /// Parse a JSON object such as `{"sim_threshold": 50, "top_courses": 10}`
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("Invalid prediction parameters")
    }

    pub fn with_sim_threshold(mut self, percent: f64) -> Self {
        self.sim_threshold = percent;
        self
    }

    pub fn with_top_courses(mut self, top_courses: usize) -> Self {
        self.top_courses = Some(top_courses);
        self
    }

    /// Similarity threshold as a fraction (0.0 - 1.0)
    pub fn sim_threshold_fraction(&self) -> f64 {
        self.sim_threshold / 100.0
    }
}
