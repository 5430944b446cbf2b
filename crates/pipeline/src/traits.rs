//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible filters to be applied to scored course candidates.

use anyhow::Result;
use sources::{ScoredCourse, UserContext};

/// Core trait for filtering scored candidates.
///
/// All filters must implement this trait to be used in the FilterPipeline.
/// Filters receive candidates already sorted by descending score and must
/// preserve that order.
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of candidates.
    ///
    /// # Arguments
    /// * `candidates` - The candidates to filter (takes ownership)
    /// * `context` - User context with the enrolled courses
    fn apply(
        &self,
        candidates: Vec<ScoredCourse>,
        context: &UserContext,
    ) -> Result<Vec<ScoredCourse>>;
}
