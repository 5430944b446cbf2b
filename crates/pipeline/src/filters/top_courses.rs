//! Filter capping how many courses are recommended.

use crate::traits::Filter;
use anyhow::Result;
use sources::{ScoredCourse, UserContext};

/// Keeps the first `limit` candidates.
///
/// Candidates arrive sorted by descending score, so this keeps the best ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopCoursesFilter {
    limit: usize,
}

impl TopCoursesFilter {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl Filter for TopCoursesFilter {
    fn name(&self) -> &str {
        "TopCoursesFilter"
    }

    fn apply(
        &self,
        mut candidates: Vec<ScoredCourse>,
        _context: &UserContext,
    ) -> Result<Vec<ScoredCourse>> {
        candidates.truncate(self.limit);
        Ok(candidates)
    }
}
