//! Location of the four flat files backing the dataset store.

use std::path::{Path, PathBuf};

pub const DEFAULT_RATINGS_FILE: &str = "ratings.csv";
pub const DEFAULT_SIMILARITY_FILE: &str = "sim.csv";
pub const DEFAULT_COURSES_FILE: &str = "course_processed.csv";
pub const DEFAULT_BOW_FILE: &str = "courses_bows.csv";

/// Paths to the ratings, similarity, course and bag-of-words files.
///
/// `DataPaths::new(dir)` points every file at its default name inside `dir`;
/// the `with_*` builders override individual files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub ratings: PathBuf,
    pub similarity: PathBuf,
    pub courses: PathBuf,
    pub bow: PathBuf,
}

impl DataPaths {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        Self {
            ratings: data_dir.join(DEFAULT_RATINGS_FILE),
            similarity: data_dir.join(DEFAULT_SIMILARITY_FILE),
            courses: data_dir.join(DEFAULT_COURSES_FILE),
            bow: data_dir.join(DEFAULT_BOW_FILE),
        }
    }

    pub fn with_ratings(mut self, path: impl Into<PathBuf>) -> Self {
        self.ratings = path.into();
        self
    }

    pub fn with_similarity(mut self, path: impl Into<PathBuf>) -> Self {
        self.similarity = path.into();
        self
    }

    pub fn with_courses(mut self, path: impl Into<PathBuf>) -> Self {
        self.courses = path.into();
        self
    }

    pub fn with_bow(mut self, path: impl Into<PathBuf>) -> Self {
        self.bow = path.into();
        self
    }
}

impl Default for DataPaths {
    fn default() -> Self {
        Self::new("data")
    }
}
