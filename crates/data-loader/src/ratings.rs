//! Registering a new learner from a course selection.
//!
//! A selection of completed courses becomes a brand-new user whose ratings
//! are appended to the rating table, so the next prediction can score them.

use crate::error::{DataLoadError, Result};
use crate::store::DatasetStore;
use crate::types::*;
use std::sync::{Arc, Mutex};
use tracing::info;

/// Rating given to every course in a new user's selection (neutral on 0-5)
pub const NEW_USER_RATING: f64 = 3.0;

/// User id handed out when the rating table is empty
pub const FIRST_USER_ID: UserId = 1;

/// Next free user id: one past the largest id in the table
pub fn next_user_id(ratings: &[RatingRecord]) -> Result<UserId> {
    match ratings.iter().map(|r| r.user).max() {
        None => Ok(FIRST_USER_ID),
        Some(max) => max.checked_add(1).ok_or_else(|| {
            DataLoadError::ValidationError(format!("user id space exhausted after {}", max))
        }),
    }
}

/// Appends synthetic ratings for newly registered users.
///
/// Each call is a read-modify-write of the whole rating table. Calls through
/// the same `RatingMutator` are serialized by an internal lock; separate
/// processes writing the same file can still race and lose an update.
pub struct RatingMutator {
    store: Arc<dyn DatasetStore>,
    write_lock: Mutex<()>,
}

impl RatingMutator {
    pub fn new(store: Arc<dyn DatasetStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Register a new user who rated each of `new_course_ids` with
    /// [`NEW_USER_RATING`] and persist the updated table.
    ///
    /// # Returns
    /// * `Ok(None)` - the selection was empty; nothing was written
    /// * `Ok(Some(id))` - the id assigned to the new user
    pub fn add_new_ratings<S: AsRef<str>>(&self, new_course_ids: &[S]) -> Result<Option<UserId>> {
        if new_course_ids.is_empty() {
            return Ok(None);
        }

        // Guards no data; only the read-compute-write sequence
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        let mut ratings = self.store.load_ratings()?;
        let new_id = next_user_id(&ratings)?;

        ratings.extend(
            new_course_ids
                .iter()
                .map(|course_id| RatingRecord::new(new_id, course_id.as_ref(), NEW_USER_RATING)),
        );
        self.store.save_ratings(&ratings)?;

        info!(
            "Registered user {} with {} selected courses",
            new_id,
            new_course_ids.len()
        );
        Ok(Some(new_id))
    }
}
