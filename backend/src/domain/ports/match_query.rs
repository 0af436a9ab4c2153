//! Port for reading shipment-to-transporter matches.

use async_trait::async_trait;

use crate::domain::{MatchId, MatchRecord, ShipmentId};

use super::LookupError;

/// Read-only view over matches.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MatchQuery: Send + Sync {
    /// Return the active (proposed or accepted) match for a shipment, if any.
    async fn active_match_for_shipment(
        &self,
        shipment_id: &ShipmentId,
    ) -> Result<Option<MatchRecord>, LookupError>;

    /// Load a match by id.
    async fn find_match(&self, match_id: &MatchId) -> Result<Option<MatchRecord>, LookupError>;
}
