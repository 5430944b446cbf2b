//! # Data Loader Crate
//!
//! This crate handles loading, indexing and updating the course datasets.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (RatingRecord, Course, BowRow, SimilarityMatrix)
//! - **parser**: Read and write the CSV files
//! - **store**: The `DatasetStore` trait with CSV and in-memory implementations
//! - **index**: Document index <-> course id mapping
//! - **ratings**: Register a new user from a course selection
//! - **config**: Where the data files live
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{CsvDatasetStore, DataPaths, DatasetStore, DocIndexMap};
//!
//! let store = CsvDatasetStore::new(DataPaths::new("data"));
//! let doc_map = DocIndexMap::load(&store)?;
//! let sims = store.load_course_sims()?;
//!
//! let idx = doc_map.doc_index("ML0101ENv3").unwrap();
//! println!("{} has {} neighbours", doc_map.course_id(idx).unwrap(), sims.size());
//! ```

// Public modules
pub mod config;
pub mod error;
pub mod index;
pub mod parser;
pub mod ratings;
pub mod store;
pub mod types;

// Re-export commonly used types for convenience
pub use config::DataPaths;
pub use error::{DataLoadError, Result};
pub use index::{get_doc_dicts, DocIndexMap};
pub use ratings::{next_user_id, RatingMutator, FIRST_USER_ID, NEW_USER_RATING};
pub use store::{CsvDatasetStore, DatasetStore, InMemoryDatasetStore};
pub use types::{
    // Type aliases
    CourseId,
    DocIndex,
    UserId,
    // Core types
    BowRow,
    Course,
    RatingRecord,
    SimilarityMatrix,
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn fixture_store() -> InMemoryDatasetStore {
        InMemoryDatasetStore::new(
            vec![RatingRecord::new(1, "C1", 5.0)],
            SimilarityMatrix::from_rows(vec![vec![1.0, 0.4], vec![0.4, 1.0]]).unwrap(),
            Vec::new(),
            vec![
                BowRow::new(0, "C1", vec![1.0]),
                BowRow::new(1, "C2", vec![2.0]),
            ],
        )
    }

    #[test]
    fn test_get_doc_dicts_from_store() {
        let store = fixture_store();
        let (index_to_id, id_to_index) = get_doc_dicts(&store).unwrap().into_parts();

        assert_eq!(index_to_id.get(&1).map(String::as_str), Some("C2"));
        assert_eq!(id_to_index.get("C1"), Some(&0));
    }

    #[test]
    fn test_new_user_is_visible_through_the_store() {
        let store = Arc::new(fixture_store());
        let mutator = RatingMutator::new(store.clone());

        let user = mutator.add_new_ratings(&["C2"]).unwrap().unwrap();

        let ratings = store.load_ratings().unwrap();
        assert!(ratings.iter().any(|r| r.user == user && r.item == "C2"));
    }
}
