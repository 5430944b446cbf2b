//! Read/write access to the four course datasets.
//!
//! The [`DatasetStore`] trait is the seam between the recommendation logic and
//! storage. [`CsvDatasetStore`] re-reads the flat files on every call;
//! [`InMemoryDatasetStore`] serves fixtures held in memory.

use crate::config::DataPaths;
use crate::error::Result;
use crate::parser;
use crate::types::*;
use std::sync::RwLock;
use tracing::debug;

/// Source of the ratings, similarity matrix, course catalogue and bag-of-words.
///
/// Implementations do no caching on behalf of the caller and propagate every
/// storage error unchanged.
pub trait DatasetStore: Send + Sync {
    fn load_ratings(&self) -> Result<Vec<RatingRecord>>;

    fn load_course_sims(&self) -> Result<SimilarityMatrix>;

    /// Course catalogue with titles already title-cased
    fn load_courses(&self) -> Result<Vec<Course>>;

    fn load_bow(&self) -> Result<Vec<BowRow>>;

    /// Replace the whole rating table
    fn save_ratings(&self, ratings: &[RatingRecord]) -> Result<()>;
}

// =============================================================================
// CSV-backed store
// =============================================================================

/// Dataset store reading and writing comma-separated files
#[derive(Debug, Clone)]
pub struct CsvDatasetStore {
    paths: DataPaths,
}

impl CsvDatasetStore {
    pub fn new(paths: DataPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &DataPaths {
        &self.paths
    }
}

impl DatasetStore for CsvDatasetStore {
    fn load_ratings(&self) -> Result<Vec<RatingRecord>> {
        let ratings = parser::parse_ratings(&self.paths.ratings)?;
        debug!("Loaded {} ratings from {:?}", ratings.len(), self.paths.ratings);
        Ok(ratings)
    }

    fn load_course_sims(&self) -> Result<SimilarityMatrix> {
        let matrix = parser::parse_similarity_matrix(&self.paths.similarity)?;
        debug!(
            "Loaded {}x{} similarity matrix from {:?}",
            matrix.size(),
            matrix.size(),
            self.paths.similarity
        );
        Ok(matrix)
    }

    fn load_courses(&self) -> Result<Vec<Course>> {
        let courses = parser::parse_courses(&self.paths.courses)?;
        debug!("Loaded {} courses from {:?}", courses.len(), self.paths.courses);
        Ok(courses)
    }

    fn load_bow(&self) -> Result<Vec<BowRow>> {
        let rows = parser::parse_bows(&self.paths.bow)?;
        debug!("Loaded {} bag-of-words rows from {:?}", rows.len(), self.paths.bow);
        Ok(rows)
    }

    fn save_ratings(&self, ratings: &[RatingRecord]) -> Result<()> {
        parser::save_ratings(&self.paths.ratings, ratings)?;
        debug!("Wrote {} ratings to {:?}", ratings.len(), self.paths.ratings);
        Ok(())
    }
}

// =============================================================================
// In-memory store
// =============================================================================

/// Dataset store over values held in memory.
///
/// Only the rating table is mutable; the other datasets are fixed at
/// construction.
#[derive(Debug)]
pub struct InMemoryDatasetStore {
    ratings: RwLock<Vec<RatingRecord>>,
    similarity: SimilarityMatrix,
    courses: Vec<Course>,
    bow: Vec<BowRow>,
}

impl InMemoryDatasetStore {
    pub fn new(
        ratings: Vec<RatingRecord>,
        similarity: SimilarityMatrix,
        courses: Vec<Course>,
        bow: Vec<BowRow>,
    ) -> Self {
        Self {
            ratings: RwLock::new(ratings),
            similarity,
            courses,
            bow,
        }
    }
}

impl DatasetStore for InMemoryDatasetStore {
    fn load_ratings(&self) -> Result<Vec<RatingRecord>> {
        // A poisoned lock still holds a complete table: writers replace it wholesale
        let ratings = self.ratings.read().unwrap_or_else(|e| e.into_inner());
        Ok(ratings.clone())
    }

    fn load_course_sims(&self) -> Result<SimilarityMatrix> {
        Ok(self.similarity.clone())
    }

    fn load_courses(&self) -> Result<Vec<Course>> {
        Ok(self.courses.clone())
    }

    fn load_bow(&self) -> Result<Vec<BowRow>> {
        Ok(self.bow.clone())
    }

    fn save_ratings(&self, ratings: &[RatingRecord]) -> Result<()> {
        let mut table = self.ratings.write().unwrap_or_else(|e| e.into_inner());
        *table = ratings.to_vec();
        Ok(())
    }
}
