//! Port for reading previously submitted ratings.

use async_trait::async_trait;

use crate::domain::{MatchId, UserId};

use super::LookupError;

/// Read-only view over ratings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RatingQuery: Send + Sync {
    /// Whether `rater` has already rated the given match.
    async fn has_rated(&self, match_id: &MatchId, rater: &UserId) -> Result<bool, LookupError>;
}
