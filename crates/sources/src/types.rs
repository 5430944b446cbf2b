//! Shared types for candidate generation.

use data_loader::{CourseId, UserId};
use std::collections::HashSet;

/// What we know about a user when recommending: the courses already taken.
#[derive(Debug, Clone, PartialEq)]
pub struct UserContext {
    pub user_id: UserId,
    /// Every course id appearing in the user's rating history
    pub enrolled_courses: HashSet<CourseId>,
}

impl UserContext {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            enrolled_courses: HashSet::new(),
        }
    }

    pub fn with_enrolled<I, S>(user_id: UserId, courses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<CourseId>,
    {
        Self {
            user_id,
            enrolled_courses: courses.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_enrolled(&self, course_id: &str) -> bool {
        self.enrolled_courses.contains(course_id)
    }
}

/// A candidate course and its similarity score
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCourse {
    pub course_id: CourseId,
    /// Best similarity to any enrolled course
    pub score: f64,
}

impl ScoredCourse {
    pub fn new(course_id: impl Into<CourseId>, score: f64) -> Self {
        Self {
            course_id: course_id.into(),
            score,
        }
    }
}
