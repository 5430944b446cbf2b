//! Filter implementations for the candidate pipeline.
//!
//! This module contains all the concrete filter implementations
//! that can be composed into a FilterPipeline.

pub mod similarity_threshold;
pub mod top_courses;

// Re-export for convenience
pub use similarity_threshold::{SimilarityThresholdFilter, DEFAULT_SIM_THRESHOLD_PERCENT};
pub use top_courses::TopCoursesFilter;
