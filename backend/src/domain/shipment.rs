//! Shipment records and their lifecycle rules.
//!
//! A shipment moves through a fixed directed graph:
//!
//! ```text
//! Pending ──► Matched ──► InTransit ──► Delivered
//!    ▲           │            │
//!    └───────────┘            │
//!    │           │            │
//!    └───────────┴────────────┴──► Cancelled
//! ```
//!
//! `Matched → Pending` covers a withdrawn match. `Delivered` and `Cancelled`
//! are terminal.

use serde::{Deserialize, Serialize};

use super::geo::{Coordinate, validate_shipment_coordinates};
use super::{Amount, Error, ErrorCode, ShipmentId, UserId};

/// Lifecycle state of a shipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipmentStatus {
    Pending,
    Matched,
    InTransit,
    Delivered,
    Cancelled,
}

impl ShipmentStatus {
    /// Every state, in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Matched,
        Self::InTransit,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// States reachable in one step from `self`.
    #[must_use]
    pub const fn allowed_successors(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Matched, Self::Cancelled],
            Self::Matched => &[Self::InTransit, Self::Pending, Self::Cancelled],
            Self::InTransit => &[Self::Delivered, Self::Cancelled],
            Self::Delivered | Self::Cancelled => &[],
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Matched => "matched",
            Self::InTransit => "in_transit",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Reject any status change that is not an edge of the lifecycle graph.
pub fn assert_status_transition(from: ShipmentStatus, to: ShipmentStatus) -> Result<(), Error> {
    if from.allowed_successors().contains(&to) {
        return Ok(());
    }
    Err(Error::new(
        ErrorCode::InvalidShipmentTransition,
        format!(
            "shipment cannot move from {} to {}",
            from.as_str(),
            to.as_str()
        ),
    ))
}

/// A shipment as submitted by a shipper, before persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct ShipmentDraft {
    pub shipper_id: UserId,
    pub cargo_type: String,
    pub weight_kg: f64,
    pub price: Amount,
    pub origin: Coordinate,
    pub destination: Coordinate,
}

/// Field checks for a new or edited shipment.
pub fn assert_valid_draft(draft: &ShipmentDraft) -> Result<(), Error> {
    if draft.cargo_type.trim().is_empty() {
        return Err(Error::new(
            ErrorCode::EmptyCargoType,
            "cargo type must not be empty",
        ));
    }
    if !draft.weight_kg.is_finite() || draft.weight_kg <= 0.0 {
        return Err(Error::new(
            ErrorCode::NonPositiveWeight,
            "weight must be greater than zero",
        ));
    }
    if !draft.price.is_positive() {
        return Err(Error::new(
            ErrorCode::NonPositivePrice,
            "price must be greater than zero",
        ));
    }
    validate_shipment_coordinates(
        draft.origin.latitude(),
        draft.origin.longitude(),
        draft.destination.latitude(),
        draft.destination.longitude(),
    )?;
    Ok(())
}

/// Persisted shipment state read back through [`crate::domain::ports::ShipmentQuery`].
#[derive(Debug, Clone, PartialEq)]
pub struct ShipmentSnapshot {
    pub id: ShipmentId,
    pub shipper_id: UserId,
    pub status: ShipmentStatus,
    pub price: Amount,
}

#[cfg(test)]
mod tests;
