//! Helper functions to build UserContext from the rating table
//!
//! The enrolled courses of a user are simply every item they have rated.

use crate::types::UserContext;
use anyhow::{Context, Result};
use data_loader::{DatasetStore, RatingRecord, UserId};

/// Build a UserContext for `user_id` from already loaded ratings.
///
/// A user with no ratings gets an empty context rather than an error, so
/// predicting for them yields no recommendations.
pub fn build_user_context(ratings: &[RatingRecord], user_id: UserId) -> UserContext {
    UserContext::with_enrolled(
        user_id,
        ratings
            .iter()
            .filter(|rating| rating.user == user_id)
            .map(|rating| rating.item.clone()),
    )
}

/// Load the rating table from `store` and build the context for `user_id`
pub fn load_user_context(store: &dyn DatasetStore, user_id: UserId) -> Result<UserContext> {
    let ratings = store
        .load_ratings()
        .context("Failed to load ratings for user context")?;
    Ok(build_user_context(&ratings, user_id))
}
