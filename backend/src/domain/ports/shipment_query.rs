//! Port for reading shipment state.

use async_trait::async_trait;

use crate::domain::{ShipmentId, ShipmentSnapshot};

use super::LookupError;

/// Read-only view over posted shipments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShipmentQuery: Send + Sync {
    /// Load the persisted state of a shipment, if it exists.
    async fn find_shipment(
        &self,
        shipment_id: &ShipmentId,
    ) -> Result<Option<ShipmentSnapshot>, LookupError>;
}
