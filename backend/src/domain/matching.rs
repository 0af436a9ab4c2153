//! Shipment-to-transporter matches.
//!
//! A shipment has at most one active match at a time. The check here is an
//! advisory pre-check; the persistence layer must hold a matching unique
//! constraint so that two concurrent requests cannot both insert.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ports::{MatchQuery, ShipmentQuery};
use super::{Error, ErrorCode, MatchId, Role, ShipmentId, ShipmentStatus, UserId, UserProfile};

/// Lifecycle state of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Proposed,
    Accepted,
    Completed,
    Rejected,
    Cancelled,
}

impl MatchStatus {
    /// Whether the match still holds the shipment.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Proposed | Self::Accepted)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Proposed => "proposed",
            Self::Accepted => "accepted",
            Self::Completed => "completed",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Persisted match state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    pub id: MatchId,
    pub shipment_id: ShipmentId,
    pub shipper_id: UserId,
    pub transporter_id: UserId,
    pub status: MatchStatus,
}

impl MatchRecord {
    /// Whether `user` is the shipper or the transporter on this match.
    #[must_use]
    pub fn involves(&self, user: &UserId) -> bool {
        self.shipper_id == *user || self.transporter_id == *user
    }
}

/// Checks run before a new match is persisted.
pub async fn assert_can_create_match(
    shipment_id: &ShipmentId,
    transporter: &UserProfile,
    shipments: &dyn ShipmentQuery,
    matches: &dyn MatchQuery,
) -> Result<(), Error> {
    let shipment = shipments
        .find_shipment(shipment_id)
        .await?
        .ok_or_else(|| Error::new(ErrorCode::ShipmentNotFound, "shipment does not exist"))?;

    if shipment.status != ShipmentStatus::Pending {
        return Err(Error::new(
            ErrorCode::ShipmentNotOpen,
            format!(
                "shipment is {} and cannot take a new match",
                shipment.status.as_str()
            ),
        ));
    }

    if let Some(existing) = matches.active_match_for_shipment(shipment_id).await? {
        debug!(
            shipment_id = %shipment_id,
            match_id = %existing.id,
            "rejecting second active match"
        );
        return Err(Error::new(
            ErrorCode::ActiveMatchExists,
            "shipment already has an active match",
        ));
    }

    if transporter.role != Role::Transporter {
        return Err(Error::new(
            ErrorCode::NotATransporter,
            "only transporters can be matched to shipments",
        ));
    }
    if !transporter.is_verified() {
        return Err(Error::new(
            ErrorCode::TransporterNotVerified,
            "transporter must be verified before taking shipments",
        ));
    }
    Ok(())
}

/// Reject any match status change outside the allowed edges.
pub fn assert_match_transition(from: MatchStatus, to: MatchStatus) -> Result<(), Error> {
    use MatchStatus::{Accepted, Cancelled, Completed, Proposed, Rejected};

    let allowed = matches!(
        (from, to),
        (Proposed, Accepted | Rejected | Cancelled) | (Accepted, Completed | Cancelled)
    );
    if allowed {
        return Ok(());
    }
    Err(Error::new(
        ErrorCode::InvalidMatchTransition,
        format!(
            "match cannot move from {} to {}",
            from.as_str(),
            to.as_str()
        ),
    ))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{MockMatchQuery, MockShipmentQuery};
    use crate::domain::{Amount, PhoneNumber, ShipmentSnapshot, VerificationStatus};
    use rstest::{fixture, rstest};

    fn shipment_with(status: ShipmentStatus) -> MockShipmentQuery {
        let mut shipments = MockShipmentQuery::new();
        shipments.expect_find_shipment().returning(move |id| {
            Ok(Some(ShipmentSnapshot {
                id: *id,
                shipper_id: UserId::random(),
                status,
                price: Amount::from_kwacha(100_000),
            }))
        });
        shipments
    }

    fn no_active_match() -> MockMatchQuery {
        let mut matches = MockMatchQuery::new();
        matches
            .expect_active_match_for_shipment()
            .returning(|_| Ok(None));
        matches
    }

    #[fixture]
    fn transporter() -> UserProfile {
        UserProfile {
            id: UserId::random(),
            phone: PhoneNumber::parse("0991234567").expect("valid phone"),
            role: Role::Transporter,
            verification: VerificationStatus::Verified,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn open_shipment_with_verified_transporter_passes(transporter: UserProfile) {
        let result = assert_can_create_match(
            &ShipmentId::random(),
            &transporter,
            &shipment_with(ShipmentStatus::Pending),
            &no_active_match(),
        )
        .await;
        assert!(result.is_ok());
    }

    #[rstest]
    #[tokio::test]
    async fn missing_shipment_is_not_found(transporter: UserProfile) {
        let mut shipments = MockShipmentQuery::new();
        shipments.expect_find_shipment().returning(|_| Ok(None));

        let err = assert_can_create_match(
            &ShipmentId::random(),
            &transporter,
            &shipments,
            &no_active_match(),
        )
        .await
        .expect_err("missing shipment must fail");
        assert_eq!(err.code(), ErrorCode::ShipmentNotFound);
        assert_eq!(err.http_status(), 404);
    }

    #[rstest]
    #[case(ShipmentStatus::Matched)]
    #[case(ShipmentStatus::InTransit)]
    #[case(ShipmentStatus::Delivered)]
    #[case(ShipmentStatus::Cancelled)]
    #[tokio::test]
    async fn non_pending_shipment_is_not_open(
        transporter: UserProfile,
        #[case] status: ShipmentStatus,
    ) {
        let err = assert_can_create_match(
            &ShipmentId::random(),
            &transporter,
            &shipment_with(status),
            &no_active_match(),
        )
        .await
        .expect_err("closed shipment must fail");
        assert_eq!(err.code(), ErrorCode::ShipmentNotOpen);
    }

    #[rstest]
    #[tokio::test]
    async fn second_active_match_is_rejected(transporter: UserProfile) {
        let shipment_id = ShipmentId::random();
        let mut matches = MockMatchQuery::new();
        matches
            .expect_active_match_for_shipment()
            .withf(move |id| *id == shipment_id)
            .returning(|id| {
                Ok(Some(MatchRecord {
                    id: MatchId::random(),
                    shipment_id: *id,
                    shipper_id: UserId::random(),
                    transporter_id: UserId::random(),
                    status: MatchStatus::Proposed,
                }))
            });

        let shipments = shipment_with(ShipmentStatus::Pending);
        for _ in 0..2 {
            let err = assert_can_create_match(&shipment_id, &transporter, &shipments, &matches)
                .await
                .expect_err("active match must block a second one");
            assert_eq!(err.code(), ErrorCode::ActiveMatchExists);
            assert_eq!(err.http_status(), 409);
        }
    }

    #[rstest]
    #[tokio::test]
    async fn unverified_transporter_is_rejected(transporter: UserProfile) {
        let mut transporter = transporter;
        transporter.verification = VerificationStatus::Pending;
        let err = assert_can_create_match(
            &ShipmentId::random(),
            &transporter,
            &shipment_with(ShipmentStatus::Pending),
            &no_active_match(),
        )
        .await
        .expect_err("unverified transporter must fail");
        assert_eq!(err.code(), ErrorCode::TransporterNotVerified);
    }

    #[rstest]
    #[tokio::test]
    async fn non_transporter_is_rejected(transporter: UserProfile) {
        let mut broker = transporter;
        broker.role = Role::Broker;
        let err = assert_can_create_match(
            &ShipmentId::random(),
            &broker,
            &shipment_with(ShipmentStatus::Pending),
            &no_active_match(),
        )
        .await
        .expect_err("broker cannot be matched");
        assert_eq!(err.code(), ErrorCode::NotATransporter);
    }

    #[rstest]
    #[case(MatchStatus::Proposed, MatchStatus::Accepted)]
    #[case(MatchStatus::Proposed, MatchStatus::Rejected)]
    #[case(MatchStatus::Proposed, MatchStatus::Cancelled)]
    #[case(MatchStatus::Accepted, MatchStatus::Completed)]
    #[case(MatchStatus::Accepted, MatchStatus::Cancelled)]
    fn allowed_match_transitions(#[case] from: MatchStatus, #[case] to: MatchStatus) {
        assert!(assert_match_transition(from, to).is_ok());
    }

    #[rstest]
    #[case(MatchStatus::Proposed, MatchStatus::Completed)]
    #[case(MatchStatus::Accepted, MatchStatus::Proposed)]
    #[case(MatchStatus::Completed, MatchStatus::Cancelled)]
    #[case(MatchStatus::Rejected, MatchStatus::Accepted)]
    #[case(MatchStatus::Cancelled, MatchStatus::Proposed)]
    fn disallowed_match_transitions(#[case] from: MatchStatus, #[case] to: MatchStatus) {
        let err = assert_match_transition(from, to).expect_err("transition must fail");
        assert_eq!(err.code(), ErrorCode::InvalidMatchTransition);
    }

    #[rstest]
    fn only_proposed_and_accepted_are_active() {
        assert!(MatchStatus::Proposed.is_active());
        assert!(MatchStatus::Accepted.is_active());
        assert!(!MatchStatus::Completed.is_active());
        assert!(!MatchStatus::Rejected.is_active());
        assert!(!MatchStatus::Cancelled.is_active());
    }
}
