//! # Recommendation Dispatcher
//!
//! This module routes a model name to its implementation and assembles a
//! uniform result table:
//! 1. Resolve the model name (unknown or unimplemented -> empty table)
//! 2. Load the document mapping, similarity matrix and ratings
//! 3. For each user: build the enrolled-course context
//! 4. Score candidates with the course similarity source
//! 5. Apply the threshold (and optional top-N) filters
//! 6. Append (user, course, score) rows
//!
//! It also covers the rest of the caller surface: training hooks, registering
//! a new user from a course selection, and joining results with course
//! metadata for display.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info, warn};

use data_loader::{CourseId, DatasetStore, RatingMutator, UserId};
use pipeline::FilterPipeline;
use pipeline::filters::{SimilarityThresholdFilter, TopCoursesFilter};
use sources::{user_context::build_user_context, CourseSimilaritySource};

use crate::models::RecommenderModel;
use crate::params::PredictParams;

/// One row of a prediction result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRow {
    #[serde(rename = "USER_ID")]
    pub user_id: UserId,
    #[serde(rename = "COURSE_ID")]
    pub course_id: CourseId,
    #[serde(rename = "SCORE")]
    pub score: f64,
}

/// Tabular prediction result: rows grouped by user in request order, each
/// group sorted by descending score
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PredictionTable {
    rows: Vec<PredictionRow>,
}

impl PredictionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, row: PredictionRow) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[PredictionRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<PredictionRow> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Outcome of a training request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainStatus {
    /// The model is ready (course similarity needs no training)
    Trained,
    /// The model has no implementation yet
    NotImplemented,
}

/// A recommended course joined with its catalogue entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseRecommendation {
    #[serde(rename = "COURSE_ID")]
    pub course_id: CourseId,
    #[serde(rename = "TITLE")]
    pub title: String,
    #[serde(rename = "DESCRIPTION")]
    pub description: String,
    #[serde(rename = "SCORE")]
    pub score: f64,
}

/// Entry point used by the presentation layer
pub struct RecommendationDispatcher {
    store: Arc<dyn DatasetStore>,
    mutator: RatingMutator,
}

impl RecommendationDispatcher {
    /// Create a dispatcher over `store`.
    ///
    /// Nothing is loaded up front; every call reads fresh data from the store.
    pub fn new(store: Arc<dyn DatasetStore>) -> Self {
        let mutator = RatingMutator::new(store.clone());
        Self { store, mutator }
    }

    pub fn store(&self) -> &dyn DatasetStore {
        self.store.as_ref()
    }

    /// Training hook. Course similarity has nothing to fit; every other
    /// model reports that it is not implemented. Never fails.
    pub fn train(&self, model_name: &str) -> TrainStatus {
        match RecommenderModel::from_name(model_name) {
            Some(model) if model.is_implemented() => {
                info!("Model '{}' needs no training", model);
                TrainStatus::Trained
            }
            Some(model) => {
                warn!("Training for model '{}' is not implemented yet", model);
                TrainStatus::NotImplemented
            }
            None => {
                warn!("Unknown model '{}', nothing to train", model_name);
                TrainStatus::NotImplemented
            }
        }
    }

    /// Predict course recommendations for each of `user_ids`.
    ///
    /// Unknown and unimplemented model names give an empty table, not an
    /// error. Storage errors are propagated.
    pub fn predict(
        &self,
        model_name: &str,
        user_ids: &[UserId],
        params: &PredictParams,
    ) -> Result<PredictionTable> {
        match RecommenderModel::from_name(model_name) {
            Some(RecommenderModel::CourseSimilarity) => {
                self.predict_course_similarity(user_ids, params)
            }
            Some(model) => {
                warn!("Prediction for model '{}' is not implemented yet", model);
                Ok(PredictionTable::new())
            }
            None => {
                warn!("Unknown model '{}', returning no predictions", model_name);
                Ok(PredictionTable::new())
            }
        }
    }

    /// Register a new user who completed `course_ids`.
    ///
    /// Returns `None` for an empty selection.
    pub fn add_new_ratings<S: AsRef<str>>(&self, course_ids: &[S]) -> Result<Option<UserId>> {
        self.mutator
            .add_new_ratings(course_ids)
            .context("Failed to add new ratings")
    }

    /// The full "recommend new courses" flow for a fresh selection:
    /// register the selection as a new user, predict for that user and join
    /// the result with course titles and descriptions.
    pub fn recommend_for_selection<S: AsRef<str>>(
        &self,
        model_name: &str,
        course_ids: &[S],
        params: &PredictParams,
    ) -> Result<Vec<CourseRecommendation>> {
        let Some(user_id) = self.add_new_ratings(course_ids)? else {
            info!("Empty course selection, no recommendations");
            return Ok(Vec::new());
        };

        let table = self.predict(model_name, &[user_id], params)?;
        self.enrich_with_courses(&table)
    }

    /// Join prediction rows with the course catalogue.
    ///
    /// Rows whose course is missing from the catalogue are dropped.
    pub fn enrich_with_courses(
        &self,
        table: &PredictionTable,
    ) -> Result<Vec<CourseRecommendation>> {
        if table.is_empty() {
            return Ok(Vec::new());
        }

        let courses = self
            .store
            .load_courses()
            .context("Failed to load course catalogue")?;
        let by_id: HashMap<&str, _> = courses
            .iter()
            .map(|course| (course.course_id.as_str(), course))
            .collect();

        let recommendations: Vec<CourseRecommendation> = table
            .rows()
            .iter()
            .filter_map(|row| {
                let course = by_id.get(row.course_id.as_str())?;
                Some(CourseRecommendation {
                    course_id: row.course_id.clone(),
                    title: course.title.clone(),
                    description: course.description.clone(),
                    score: row.score,
                })
            })
            .collect();

        if recommendations.len() != table.len() {
            warn!(
                "{} recommended courses are missing from the catalogue",
                table.len() - recommendations.len()
            );
        }
        Ok(recommendations)
    }

    fn predict_course_similarity(
        &self,
        user_ids: &[UserId],
        params: &PredictParams,
    ) -> Result<PredictionTable> {
        if user_ids.is_empty() {
            return Ok(PredictionTable::new());
        }
        let start_time = Instant::now();

        // The similarity data and the ratings come from independent files
        let store = self.store.as_ref();
        let (source, ratings) = rayon::join(
            || CourseSimilaritySource::from_store(store),
            || store.load_ratings(),
        );
        let source = source?;
        let ratings = ratings.context("Failed to load ratings")?;

        let filters = Self::build_filter_pipeline(params);
        let mut table = PredictionTable::new();

        for &user_id in user_ids {
            let context = build_user_context(&ratings, user_id);
            let candidates = source.get_candidates(&context);
            let selected = filters
                .apply(candidates, &context)
                .context("Failed to apply filters")?;

            debug!(
                "User {}: {} courses taken, {} recommended",
                user_id,
                context.enrolled_courses.len(),
                selected.len()
            );
            for scored in selected {
                table.push(PredictionRow {
                    user_id,
                    course_id: scored.course_id,
                    score: scored.score,
                });
            }
        }

        info!(
            "Predicted {} rows for {} users in {:.2?}",
            table.len(),
            user_ids.len(),
            start_time.elapsed()
        );
        Ok(table)
    }

    fn build_filter_pipeline(params: &PredictParams) -> FilterPipeline {
        FilterPipeline::new()
            .add_filter(SimilarityThresholdFilter::new(params.sim_threshold_fraction()))
            .add_optional_filter(params.top_courses.map(TopCoursesFilter::new))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{BowRow, Course, InMemoryDatasetStore, RatingRecord, SimilarityMatrix};

    // ============================================================================
    // Test Fixtures
    // ============================================================================

    fn course(id: &str, title: &str) -> Course {
        Course {
            course_id: id.to_string(),
            title: title.to_string(),
            description: format!("About {}", title),
        }
    }

    /// Four courses; user 41 took C1, user 7 took C3
    fn build_test_store() -> Arc<InMemoryDatasetStore> {
        let bow = ["C1", "C2", "C3", "C4"]
            .iter()
            .enumerate()
            .flat_map(|(idx, id)| {
                vec![BowRow::new(idx, *id, vec![1.0]), BowRow::new(idx, *id, vec![4.0])]
            })
            .collect();

        Arc::new(InMemoryDatasetStore::new(
            vec![
                RatingRecord::new(41, "C1", 5.0),
                RatingRecord::new(7, "C3", 4.0),
            ],
            SimilarityMatrix::from_rows(vec![
                vec![1.0, 0.9, 0.3, 1.0],
                vec![0.9, 1.0, 0.65, 0.2],
                vec![0.3, 0.65, 1.0, 0.5],
                vec![1.0, 0.2, 0.5, 1.0],
            ])
            .unwrap(),
            vec![
                course("C1", "Python Basics"),
                course("C2", "Data Analysis"),
                course("C4", "Python Projects"),
            ],
            bow,
        ))
    }

    fn build_test_dispatcher() -> (RecommendationDispatcher, Arc<InMemoryDatasetStore>) {
        let store = build_test_store();
        (RecommendationDispatcher::new(store.clone()), store)
    }

    fn row(user_id: UserId, course_id: &str, score: f64) -> PredictionRow {
        PredictionRow {
            user_id,
            course_id: course_id.to_string(),
            score,
        }
    }

    fn course_ids(table: &PredictionTable) -> Vec<&str> {
        table.rows().iter().map(|row| row.course_id.as_str()).collect()
    }

    // ============================================================================
    // predict
    // ============================================================================

    #[test]
    fn test_predict_default_threshold() {
        let (dispatcher, _) = build_test_dispatcher();

        let table = dispatcher
            .predict("Course Similarity", &[41], &PredictParams::default())
            .unwrap();

        assert_eq!(
            table.rows(),
            &[row(41, "C4", 1.0), row(41, "C2", 0.9)]
        );
    }

    #[test]
    fn test_predict_zero_threshold_returns_every_scored_candidate() {
        let (dispatcher, _) = build_test_dispatcher();
        let params = PredictParams::default().with_sim_threshold(0.0);

        let table = dispatcher.predict("Course Similarity", &[41], &params).unwrap();

        assert_eq!(course_ids(&table), vec!["C4", "C2", "C3"]);
    }

    #[test]
    fn test_predict_full_threshold_keeps_perfect_matches() {
        let (dispatcher, _) = build_test_dispatcher();
        let params = PredictParams::default().with_sim_threshold(100.0);

        let table = dispatcher.predict("Course Similarity", &[41], &params).unwrap();

        assert_eq!(course_ids(&table), vec!["C4"]);
    }

    #[test]
    fn test_predict_top_courses_caps_each_user() {
        let (dispatcher, _) = build_test_dispatcher();
        let params = PredictParams::default()
            .with_sim_threshold(0.0)
            .with_top_courses(1);

        let table = dispatcher
            .predict("Course Similarity", &[41, 7], &params)
            .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].user_id, 41);
        assert_eq!(table.rows()[1], row(7, "C2", 0.65));
    }

    #[test]
    fn test_predict_unimplemented_and_unknown_models_are_empty() {
        let (dispatcher, _) = build_test_dispatcher();
        let params = PredictParams::default();

        assert!(dispatcher.predict("KNN", &[41], &params).unwrap().is_empty());
        assert!(dispatcher.predict("Neural Network", &[41], &params).unwrap().is_empty());
        assert!(dispatcher.predict("Magic", &[41], &params).unwrap().is_empty());
    }

    #[test]
    fn test_predict_no_users_reads_nothing() {
        // A store whose files do not exist would fail on any read
        let store = Arc::new(data_loader::CsvDatasetStore::new(
            data_loader::DataPaths::new("/nonexistent/course-recs"),
        ));
        let dispatcher = RecommendationDispatcher::new(store);

        let table = dispatcher
            .predict("Course Similarity", &[], &PredictParams::default())
            .unwrap();

        assert!(table.is_empty());
    }

    #[test]
    fn test_predict_unknown_user_is_empty() {
        let (dispatcher, _) = build_test_dispatcher();

        let table = dispatcher
            .predict("Course Similarity", &[999], &PredictParams::default())
            .unwrap();

        assert!(table.is_empty());
    }

    // ============================================================================
    // train
    // ============================================================================

    #[test]
    fn test_train() {
        let (dispatcher, _) = build_test_dispatcher();

        assert_eq!(dispatcher.train("Course Similarity"), TrainStatus::Trained);
        assert_eq!(dispatcher.train("NMF"), TrainStatus::NotImplemented);
        assert_eq!(dispatcher.train("nope"), TrainStatus::NotImplemented);
    }

    // ============================================================================
    // add_new_ratings / recommend_for_selection
    // ============================================================================

    #[test]
    fn test_add_new_ratings_then_predict() {
        let (dispatcher, store) = build_test_dispatcher();

        let user_id = dispatcher.add_new_ratings(&["C2"]).unwrap().unwrap();
        assert_eq!(user_id, 42);
        assert_eq!(store.load_ratings().unwrap().len(), 3);

        let table = dispatcher
            .predict("Course Similarity", &[user_id], &PredictParams::default())
            .unwrap();
        assert_eq!(course_ids(&table), vec!["C1", "C3"]);
    }

    #[test]
    fn test_recommend_for_selection_joins_catalogue() {
        let (dispatcher, _) = build_test_dispatcher();

        let recs = dispatcher
            .recommend_for_selection(
                "Course Similarity",
                &["C3"],
                &PredictParams::default().with_sim_threshold(50.0),
            )
            .unwrap();

        // C2 (0.65) is in the catalogue; C4 (0.5) is too
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].course_id, "C2");
        assert_eq!(recs[0].title, "Data Analysis");
        assert_eq!(recs[1].course_id, "C4");
        assert_eq!(recs[1].description, "About Python Projects");
    }

    #[test]
    fn test_enrich_drops_courses_missing_from_catalogue() {
        let (dispatcher, _) = build_test_dispatcher();
        let mut table = PredictionTable::new();
        table.push(row(1, "C3", 0.8));
        table.push(row(1, "C2", 0.7));

        let recs = dispatcher.enrich_with_courses(&table).unwrap();

        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].course_id, "C2");
    }

    #[test]
    fn test_empty_selection_registers_nobody() {
        let (dispatcher, store) = build_test_dispatcher();

        let empty: [&str; 0] = [];
        let recs = dispatcher
            .recommend_for_selection("Course Similarity", &empty, &PredictParams::default())
            .unwrap();

        assert!(recs.is_empty());
        assert_eq!(store.load_ratings().unwrap().len(), 2);
    }

    #[test]
    fn test_prediction_rows_serialize_with_table_headers() {
        let mut table = PredictionTable::new();
        table.push(row(3, "C1", 0.75));

        let json = serde_json::to_string(&table).unwrap();

        assert_eq!(json, r#"[{"USER_ID":3,"COURSE_ID":"C1","SCORE":0.75}]"#);
    }
}
