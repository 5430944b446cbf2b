//! # Sources Crate
//!
//! This crate implements candidate generation for course recommendations.
//!
//! ## Components
//!
//! ### Course Similarity Source (content-based)
//! "Courses like the ones you already took":
//! - Every untaken course is a candidate
//! - A candidate's score is its best similarity to any taken course
//! - Similarities come from the precomputed course-to-course matrix
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{CsvDatasetStore, DataPaths, DatasetStore};
//! use sources::{user_context::build_user_context, CourseSimilaritySource};
//!
//! let store = CsvDatasetStore::new(DataPaths::new("data"));
//! let source = CourseSimilaritySource::from_store(&store)?;
//!
//! let ratings = store.load_ratings()?;
//! let context = build_user_context(&ratings, user_id);
//! let candidates = source.get_candidates(&context);
//! ```

// Public modules
pub mod course_similarity;
pub mod types;
pub mod user_context;

// Re-export commonly used types
pub use course_similarity::{
    course_similarity_recommendations, sort_by_score, CourseSimilaritySource,
};
pub use types::{ScoredCourse, UserContext};
