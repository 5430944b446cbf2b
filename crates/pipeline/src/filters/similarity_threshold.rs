//! Filter to drop weak matches.
//!
//! Keeps only candidates whose similarity score reaches the threshold.

use crate::traits::Filter;
use anyhow::Result;
use sources::{ScoredCourse, UserContext};

/// Default threshold as a percentage (60%)
pub const DEFAULT_SIM_THRESHOLD_PERCENT: f64 = 60.0;

/// Removes candidates scoring below a similarity threshold.
///
/// The threshold is a fraction in [0, 1]; a candidate survives when
/// `score >= threshold`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityThresholdFilter {
    threshold: f64,
}

impl SimilarityThresholdFilter {
    /// Create a filter from a fractional threshold (0.0 - 1.0)
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Create a filter from a percentage (0 - 100), e.g. 60 -> 0.6
    pub fn from_percent(percent: f64) -> Self {
        Self::new(percent / 100.0)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl Default for SimilarityThresholdFilter {
    fn default() -> Self {
        Self::from_percent(DEFAULT_SIM_THRESHOLD_PERCENT)
    }
}

impl Filter for SimilarityThresholdFilter {
    fn name(&self) -> &str {
        "SimilarityThresholdFilter"
    }

    fn apply(
        &self,
        candidates: Vec<ScoredCourse>,
        _context: &UserContext,
    ) -> Result<Vec<ScoredCourse>> {
        let filtered: Vec<ScoredCourse> = candidates
            .into_iter()
            .filter(|candidate| candidate.score >= self.threshold)
            .collect();
        Ok(filtered)
    }
}
