//! Pipeline for filtering scored course candidates.
//!
//! This crate provides:
//! - Filter trait and implementations for candidate filtering
//! - FilterPipeline for composing filters
//!
//! ## Architecture
//! Candidates arrive from a source already scored and sorted, then:
//! 1. SimilarityThresholdFilter drops weak matches
//! 2. TopCoursesFilter optionally caps the list
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::FilterPipeline;
//! use pipeline::filters::*;
//!
//! let pipeline = FilterPipeline::new()
//!     .add_filter(SimilarityThresholdFilter::from_percent(60.0))
//!     .add_filter(TopCoursesFilter::new(10));
//!
//! let filtered = pipeline.apply(candidates, &context)?;
//! ```

pub mod filter_pipeline;
pub mod filters;
pub mod traits;

// Re-export main types
pub use filter_pipeline::FilterPipeline;
pub use traits::Filter;
