//! GetRecentMatchesHandler - the newest applied matches of a family.

use std::sync::Arc;

use super::ReportingError;
use crate::domain::foundation::FamilyId;
use crate::domain::rating::MatchRecord;
use crate::ports::MatchHistory;

/// Matches returned when the query does not set a limit.
pub const DEFAULT_RECENT_LIMIT: usize = 10;

#[derive(Debug, Clone)]
pub struct GetRecentMatchesQuery {
    pub family_id: FamilyId,
    pub limit: Option<usize>,
}

pub struct GetRecentMatchesHandler {
    history: Arc<dyn MatchHistory>,
}

impl GetRecentMatchesHandler {
    pub fn new(history: Arc<dyn MatchHistory>) -> Self {
        Self { history }
    }

    /// Newest first.
    pub async fn handle(&self, query: GetRecentMatchesQuery) -> Result<Vec<MatchRecord>, ReportingError> {
        let limit = query.limit.unwrap_or(DEFAULT_RECENT_LIMIT);
        Ok(self.history.recent(&query.family_id, limit).await?)
    }
}
