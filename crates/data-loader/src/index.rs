//! Document index mapping.
//!
//! The similarity matrix is addressed by dense document index while ratings
//! and the course catalogue use stable course ids. [`DocIndexMap`] holds both
//! directions of that mapping, derived from the bag-of-words table.

use crate::error::{DataLoadError, Result};
use crate::store::DatasetStore;
use crate::types::*;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Bidirectional mapping between [`DocIndex`] and [`CourseId`].
///
/// Invariant: course ids are unique across document indices, so the two maps
/// are exact inverses of each other.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocIndexMap {
    index_to_id: BTreeMap<DocIndex, CourseId>,
    id_to_index: HashMap<CourseId, DocIndex>,
}

impl DocIndexMap {
    /// Build the mapping from bag-of-words rows.
    ///
    /// Rows repeat once per token, so they are collapsed per `doc_index`. When
    /// one index carries several course ids, the id on the row with the largest
    /// weight is kept (ties go to the smallest id).
    ///
    /// Fails with [`DataLoadError::DuplicateDocId`] if one course id ends up on
    /// two document indices.
    pub fn from_bows(rows: &[BowRow]) -> Result<Self> {
        let mut canonical: BTreeMap<DocIndex, (&str, f64)> = BTreeMap::new();
        for row in rows {
            let weight = row.max_weight();
            canonical
                .entry(row.doc_index)
                .and_modify(|(doc_id, best)| {
                    let heavier = weight > *best;
                    let tie_won = weight == *best && row.doc_id.as_str() < *doc_id;
                    if heavier || tie_won {
                        *doc_id = row.doc_id.as_str();
                        *best = weight;
                    }
                })
                .or_insert((row.doc_id.as_str(), weight));
        }

        let mut map = DocIndexMap::default();
        for (doc_index, (doc_id, _)) in canonical {
            if let Some(first) = map.id_to_index.insert(doc_id.to_string(), doc_index) {
                return Err(DataLoadError::DuplicateDocId {
                    doc_id: doc_id.to_string(),
                    first,
                    second: doc_index,
                });
            }
            map.index_to_id.insert(doc_index, doc_id.to_string());
        }

        debug!(
            "Built document index mapping for {} courses from {} rows",
            map.len(),
            rows.len()
        );
        Ok(map)
    }

    /// Load the bag-of-words table from `store` and build the mapping
    pub fn load(store: &dyn DatasetStore) -> Result<Self> {
        let rows = store.load_bow()?;
        Self::from_bows(&rows)
    }

    /// Course id stored at a document index
    pub fn course_id(&self, doc_index: DocIndex) -> Option<&str> {
        self.index_to_id.get(&doc_index).map(String::as_str)
    }

    /// Document index of a course id
    pub fn doc_index(&self, course_id: &str) -> Option<DocIndex> {
        self.id_to_index.get(course_id).copied()
    }

    pub fn contains(&self, course_id: &str) -> bool {
        self.id_to_index.contains_key(course_id)
    }

    /// Every known course id, in document index order
    pub fn course_ids(&self) -> impl Iterator<Item = &str> {
        self.index_to_id.values().map(String::as_str)
    }

    /// Highest document index present
    pub fn max_index(&self) -> Option<DocIndex> {
        self.index_to_id.keys().next_back().copied()
    }

    pub fn index_to_id(&self) -> &BTreeMap<DocIndex, CourseId> {
        &self.index_to_id
    }

    pub fn id_to_index(&self) -> &HashMap<CourseId, DocIndex> {
        &self.id_to_index
    }

    /// Split into (index -> id, id -> index)
    pub fn into_parts(self) -> (BTreeMap<DocIndex, CourseId>, HashMap<CourseId, DocIndex>) {
        (self.index_to_id, self.id_to_index)
    }

    pub fn len(&self) -> usize {
        self.index_to_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index_to_id.is_empty()
    }
}

/// Load both document dictionaries from the store
pub fn get_doc_dicts(store: &dyn DatasetStore) -> Result<DocIndexMap> {
    DocIndexMap::load(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bow(doc_index: DocIndex, doc_id: &str, weight: f64) -> BowRow {
        BowRow::new(doc_index, doc_id, vec![weight])
    }

    #[test]
    fn test_round_trip_for_unique_ids() {
        let ids = ["ML0101ENv3", "PY0101EN", "DB0101EN", "BD0111EN"];
        let rows: Vec<BowRow> = ids
            .iter()
            .enumerate()
            .map(|(idx, id)| bow(idx, id, 1.0))
            .collect();

        let map = DocIndexMap::from_bows(&rows).unwrap();

        assert_eq!(map.len(), ids.len());
        for (idx, id) in ids.iter().enumerate() {
            assert_eq!(map.course_id(idx), Some(*id));
            assert_eq!(map.doc_index(id), Some(idx));
        }
    }

    #[test]
    fn test_repeated_token_rows_collapse() {
        let rows = vec![
            bow(0, "C1", 2.0),
            bow(0, "C1", 7.0),
            bow(0, "C1", 1.0),
            bow(1, "C2", 3.0),
            bow(1, "C2", 3.0),
        ];

        let map = DocIndexMap::from_bows(&rows).unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(map.course_ids().collect::<Vec<_>>(), vec!["C1", "C2"]);
        assert_eq!(map.max_index(), Some(1));
    }

    #[test]
    fn test_conflicting_ids_on_one_index_keep_heaviest_row() {
        let rows = vec![bow(0, "C1", 2.0), bow(0, "C9", 5.0), bow(1, "C2", 1.0)];

        let map = DocIndexMap::from_bows(&rows).unwrap();

        assert_eq!(map.course_id(0), Some("C9"));
        assert!(!map.contains("C1"));
    }

    #[test]
    fn test_conflicting_ids_tie_prefers_smallest_id() {
        let rows = vec![bow(0, "C5", 4.0), bow(0, "C3", 4.0)];

        let map = DocIndexMap::from_bows(&rows).unwrap();

        assert_eq!(map.course_id(0), Some("C3"));
    }

    #[test]
    fn test_duplicate_doc_id_is_rejected() {
        let rows = vec![bow(0, "C1", 1.0), bow(1, "C2", 1.0), bow(2, "C1", 1.0)];

        let err = DocIndexMap::from_bows(&rows).unwrap_err();

        assert!(matches!(
            err,
            DataLoadError::DuplicateDocId { ref doc_id, first: 0, second: 2 } if doc_id == "C1"
        ));
    }

    #[test]
    fn test_empty_table() {
        let map = DocIndexMap::from_bows(&[]).unwrap();
        assert!(map.is_empty());
        assert_eq!(map.max_index(), None);
        assert_eq!(map.doc_index("C1"), None);
    }
}
