//! Course Similarity Source - content-based candidate scoring
//!
//! Scores every course a user has not taken by its closest match among the
//! courses they have taken, using the precomputed similarity matrix.
//!
//! ## Algorithm
//! 1. Resolve the user's enrolled course ids to document indices
//!    (unknown ids are skipped)
//! 2. Candidates = every course in the document mapping minus the enrolled set
//! 3. For each candidate, score = max over enrolled indices of sim[enrolled][candidate]
//! 4. Sort by score descending, course id ascending on ties
//!
//! Cost is O(E x C) matrix lookups for E enrolled and C candidate courses.

use crate::types::{ScoredCourse, UserContext};
use anyhow::{Context, Result};
use data_loader::{CourseId, DatasetStore, DocIndex, DocIndexMap, SimilarityMatrix};
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Score every course not in `enrolled_course_ids` by its best similarity to
/// an enrolled course.
///
/// Course ids missing from `doc_map`, and matrix cells outside the matrix or
/// holding NaN, are lookup misses: they never contribute a score and never
/// cause an error. The result is a pure function of the arguments.
pub fn course_similarity_recommendations(
    doc_map: &DocIndexMap,
    enrolled_course_ids: &HashSet<CourseId>,
    sim_matrix: &SimilarityMatrix,
) -> Vec<ScoredCourse> {
    let enrolled_indices: Vec<DocIndex> = enrolled_course_ids
        .iter()
        .filter_map(|course_id| doc_map.doc_index(course_id))
        .collect();

    if enrolled_indices.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<ScoredCourse> = doc_map
        .index_to_id()
        .par_iter()
        .filter(|(_, course_id)| !enrolled_course_ids.contains(course_id.as_str()))
        .filter_map(|(&candidate, course_id)| {
            enrolled_indices
                .iter()
                .filter_map(|&enrolled| sim_matrix.get(enrolled, candidate))
                .filter(|sim| !sim.is_nan())
                .reduce(f64::max)
                .map(|score| ScoredCourse::new(course_id.clone(), score))
        })
        .collect();

    sort_by_score(&mut scored);
    scored
}

/// Sort by score descending, then course id ascending for reproducible ties
pub fn sort_by_score(scored: &mut [ScoredCourse]) {
    scored.sort_by(|a, b| match b.score.total_cmp(&a.score) {
        Ordering::Equal => a.course_id.cmp(&b.course_id),
        other => other,
    });
}

/// Course similarity source over a shared document mapping and matrix.
///
/// Both are immutable once loaded, so the source is cheap to clone and can be
/// reused for every user of one prediction call.
#[derive(Debug, Clone)]
pub struct CourseSimilaritySource {
    doc_map: Arc<DocIndexMap>,
    sim_matrix: Arc<SimilarityMatrix>,
}

impl CourseSimilaritySource {
    pub fn new(doc_map: Arc<DocIndexMap>, sim_matrix: Arc<SimilarityMatrix>) -> Self {
        if let Some(max_index) = doc_map.max_index() {
            if max_index >= sim_matrix.size() {
                warn!(
                    "Similarity matrix is {}x{} but document indices reach {}; courses beyond it cannot be scored",
                    sim_matrix.size(),
                    sim_matrix.size(),
                    max_index
                );
            }
        }
        Self {
            doc_map,
            sim_matrix,
        }
    }

    /// Load the bag-of-words mapping and the similarity matrix from `store`.
    ///
    /// The two files are independent, so they are read in parallel.
    pub fn from_store(store: &dyn DatasetStore) -> Result<Self> {
        let (doc_map, sim_matrix) = rayon::join(
            || DocIndexMap::load(store),
            || store.load_course_sims(),
        );
        let doc_map = doc_map.context("Failed to build document index mapping")?;
        let sim_matrix = sim_matrix.context("Failed to load course similarity matrix")?;

        Ok(Self::new(Arc::new(doc_map), Arc::new(sim_matrix)))
    }

    pub fn doc_map(&self) -> &DocIndexMap {
        &self.doc_map
    }

    pub fn sim_matrix(&self) -> &SimilarityMatrix {
        &self.sim_matrix
    }

    /// Score every course the user has not taken
    #[instrument(skip(self, user_context), fields(user_id = user_context.user_id))]
    pub fn get_candidates(&self, user_context: &UserContext) -> Vec<ScoredCourse> {
        debug!(
            "Scoring candidates for user {} (enrolled: {})",
            user_context.user_id,
            user_context.enrolled_courses.len()
        );
        let candidates = course_similarity_recommendations(
            &self.doc_map,
            &user_context.enrolled_courses,
            &self.sim_matrix,
        );
        debug!("Generated {} similarity candidates", candidates.len());
        candidates
    }
}
