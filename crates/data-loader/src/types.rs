//! Core domain types for the course datasets.
//!
//! This module defines the records read from the four flat files and the
//! dense similarity matrix the recommender scores against.

use crate::error::{DataLoadError, Result};
use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// Type Aliases
// =============================================================================

/// Identifier of a learner in the ratings table
pub type UserId = u64;

/// Stable course identifier, e.g. "ML0101ENv3"
pub type CourseId = String;

/// Dense position of a course inside the similarity matrix and bag-of-words table
pub type DocIndex = usize;

// =============================================================================
// Rating Type
// =============================================================================

/// A single row of `ratings.csv`.
///
/// The table is append-only and carries no uniqueness constraint, so the same
/// (user, item) pair may appear more than once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingRecord {
    pub user: UserId,
    pub item: CourseId,
    /// Rating on a 0-5 scale
    pub rating: f64,
}

impl RatingRecord {
    pub fn new(user: UserId, item: impl Into<CourseId>, rating: f64) -> Self {
        Self {
            user,
            item: item.into(),
            rating,
        }
    }
}

// =============================================================================
// Course Type
// =============================================================================

/// Course metadata from `course_processed.csv`.
///
/// Feature columns used by other model families are ignored on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    #[serde(rename = "COURSE_ID")]
    pub course_id: CourseId,
    /// Normalized to title case when deserialized
    #[serde(rename = "TITLE", deserialize_with = "deserialize_title")]
    pub title: String,
    #[serde(rename = "DESCRIPTION", default)]
    pub description: String,
}

fn deserialize_title<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(title_case(&raw))
}

/// Title-case a string: the first letter after any non-letter is upper-cased,
/// every other letter is lower-cased.
///
/// Example: "machine learning with python" -> "Machine Learning With Python"
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_letter = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}

// =============================================================================
// Bag-of-words Type
// =============================================================================

/// One row of `courses_bows.csv`.
///
/// Only numeric columns besides `doc_index` and `doc_id` are kept as weights;
/// they are used to pick a canonical row when a document index repeats.
#[derive(Debug, Clone, PartialEq)]
pub struct BowRow {
    pub doc_index: DocIndex,
    pub doc_id: CourseId,
    pub weights: Vec<f64>,
}

impl BowRow {
    pub fn new(doc_index: DocIndex, doc_id: impl Into<CourseId>, weights: Vec<f64>) -> Self {
        Self {
            doc_index,
            doc_id: doc_id.into(),
            weights,
        }
    }

    /// Largest weight on the row, `NEG_INFINITY` when the row has none
    pub fn max_weight(&self) -> f64 {
        self.weights.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}

// =============================================================================
// SimilarityMatrix - Course-to-course scores
// =============================================================================

/// Square course-to-course similarity matrix indexed by [`DocIndex`].
///
/// Stored row-major in a single allocation. Values are expected to lie in
/// [0, 1] but this is not enforced.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    size: usize,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// Build a matrix from its rows, rejecting ragged or non-square input
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let size = rows.len();
        let mut values = Vec::with_capacity(size * size);
        for (row, cells) in rows.into_iter().enumerate() {
            if cells.len() != size {
                return Err(DataLoadError::NonSquareMatrix {
                    row,
                    expected: size,
                    found: cells.len(),
                });
            }
            values.extend(cells);
        }
        Ok(Self { size, values })
    }

    /// Number of rows (and columns)
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Similarity between the documents at `row` and `col`.
    ///
    /// Returns `None` when either index lies outside the matrix.
    pub fn get(&self, row: DocIndex, col: DocIndex) -> Option<f64> {
        if row >= self.size || col >= self.size {
            return None;
        }
        self.values.get(row * self.size + col).copied()
    }

    /// Borrow one row of the matrix
    pub fn row(&self, row: DocIndex) -> Option<&[f64]> {
        if row >= self.size {
            return None;
        }
        let start = row * self.size;
        Some(&self.values[start..start + self.size])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("machine learning with python"), "Machine Learning With Python");
        assert_eq!(title_case("INTRO TO AI"), "Intro To Ai");
        assert_eq!(title_case("python 101: data-science"), "Python 101: Data-Science");
        assert_eq!(title_case("3d printing"), "3D Printing");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_matrix_lookup() {
        let matrix = SimilarityMatrix::from_rows(vec![
            vec![1.0, 0.2],
            vec![0.2, 1.0],
        ])
        .unwrap();

        assert_eq!(matrix.size(), 2);
        assert_eq!(matrix.get(0, 1), Some(0.2));
        assert_eq!(matrix.get(1, 1), Some(1.0));
        assert_eq!(matrix.get(2, 0), None);
        assert_eq!(matrix.row(1), Some(&[0.2, 1.0][..]));
    }

    #[test]
    fn test_matrix_rejects_ragged_rows() {
        let result = SimilarityMatrix::from_rows(vec![vec![1.0, 0.5], vec![0.5]]);
        assert!(matches!(
            result,
            Err(DataLoadError::NonSquareMatrix { row: 1, expected: 2, found: 1 })
        ));
    }

    #[test]
    fn test_bow_row_max_weight() {
        let row = BowRow::new(0, "C1", vec![1.0, 4.0, 2.0]);
        assert_eq!(row.max_weight(), 4.0);

        let empty = BowRow::new(1, "C2", vec![]);
        assert_eq!(empty.max_weight(), f64::NEG_INFINITY);
    }
}
