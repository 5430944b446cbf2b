//! Server crate for the course recommendation engine.
//!
//! This crate contains the dispatcher that routes a model name to its
//! implementation and coordinates the loaders, the similarity source and the
//! filter pipeline.

pub mod dispatcher;
pub mod models;
pub mod params;

pub use dispatcher::{
    CourseRecommendation, PredictionRow, PredictionTable, RecommendationDispatcher, TrainStatus,
};
pub use models::{RecommenderModel, UnknownModel};
pub use params::PredictParams;
