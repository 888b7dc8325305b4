//! GetGlobalRatingsHandler - Query handler for the family-wide rating pair.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::errors::load_or_fresh;
use super::ReportingError;
use crate::domain::foundation::FamilyId;
use crate::domain::rating::{Rating, RatingSettings};
use crate::ports::RatingStore;

#[derive(Debug, Clone)]
pub struct GetGlobalRatingsQuery {
    pub family_id: FamilyId,
}

/// Global Mama and Papa ratings; the initial rating with no matches for a
/// family that has none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalRatings {
    pub mama: Rating,
    pub papa: Rating,
}

pub struct GetGlobalRatingsHandler {
    ratings: Arc<dyn RatingStore>,
    settings: RatingSettings,
}

impl GetGlobalRatingsHandler {
    pub fn new(ratings: Arc<dyn RatingStore>, settings: RatingSettings) -> Self {
        Self { ratings, settings }
    }

    pub async fn handle(&self, query: GetGlobalRatingsQuery) -> Result<GlobalRatings, ReportingError> {
        let ratings = load_or_fresh(self.ratings.as_ref(), &query.family_id).await?;
        let pair = ratings.global_or_initial(self.settings.initial_rating);
        Ok(GlobalRatings {
            mama: pair.mama,
            papa: pair.papa,
        })
    }
}
