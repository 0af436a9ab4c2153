//! Tests for shipment field checks and the status graph.

use super::*;
use crate::domain::geo::District;
use rstest::{fixture, rstest};

use super::ShipmentStatus::{Cancelled, Delivered, InTransit, Matched, Pending};

#[fixture]
fn draft() -> ShipmentDraft {
    ShipmentDraft {
        shipper_id: UserId::random(),
        cargo_type: "maize".to_owned(),
        weight_kg: 1_500.0,
        price: Amount::from_kwacha(250_000),
        origin: District::Lilongwe.coordinate(),
        destination: District::Blantyre.coordinate(),
    }
}

#[rstest]
fn valid_draft_passes(draft: ShipmentDraft) {
    assert!(assert_valid_draft(&draft).is_ok());
}

#[rstest]
#[case(0.0)]
#[case(-5.0)]
#[case(f64::NAN)]
#[case(f64::INFINITY)]
fn non_positive_weight_is_rejected(draft: ShipmentDraft, #[case] weight_kg: f64) {
    let mut draft = draft;
    draft.weight_kg = weight_kg;
    let err = assert_valid_draft(&draft).expect_err("weight must be positive");
    assert_eq!(err.code(), ErrorCode::NonPositiveWeight);
}

#[rstest]
#[case(0)]
#[case(-100)]
fn non_positive_price_is_rejected(draft: ShipmentDraft, #[case] tambala: i64) {
    let mut draft = draft;
    draft.price = Amount::from_tambala(tambala);
    let err = assert_valid_draft(&draft).expect_err("price must be positive");
    assert_eq!(err.code(), ErrorCode::NonPositivePrice);
}

#[rstest]
fn blank_cargo_type_is_rejected(draft: ShipmentDraft) {
    let mut draft = draft;
    draft.cargo_type = "  ".to_owned();
    let err = assert_valid_draft(&draft).expect_err("cargo type required");
    assert_eq!(err.code(), ErrorCode::EmptyCargoType);
}

#[rstest]
fn destination_outside_region_is_rejected(draft: ShipmentDraft) {
    let mut draft = draft;
    // Nairobi.
    draft.destination = Coordinate::try_new(-1.3, 36.8).expect("valid coordinate");
    let err = assert_valid_draft(&draft).expect_err("destination must be in region");
    assert_eq!(err.code(), ErrorCode::OutOfRegion);
}

#[rstest]
#[case(Pending, Matched)]
#[case(Pending, Cancelled)]
#[case(Matched, InTransit)]
#[case(Matched, Pending)]
#[case(Matched, Cancelled)]
#[case(InTransit, Delivered)]
#[case(InTransit, Cancelled)]
fn graph_edges_are_allowed(#[case] from: ShipmentStatus, #[case] to: ShipmentStatus) {
    assert!(assert_status_transition(from, to).is_ok());
}

#[rstest]
#[case(Pending, InTransit)]
#[case(Pending, Delivered)]
#[case(InTransit, Matched)]
#[case(InTransit, Pending)]
#[case(Delivered, Cancelled)]
#[case(Cancelled, Pending)]
#[case(Pending, Pending)]
fn off_graph_transitions_are_rejected(#[case] from: ShipmentStatus, #[case] to: ShipmentStatus) {
    let err = assert_status_transition(from, to).expect_err("transition must fail");
    assert_eq!(err.code(), ErrorCode::InvalidShipmentTransition);
}

#[rstest]
fn exactly_seven_edges_exist() {
    let edges: usize = ShipmentStatus::ALL
        .iter()
        .flat_map(|from| ShipmentStatus::ALL.iter().map(move |to| (*from, *to)))
        .filter(|(from, to)| assert_status_transition(*from, *to).is_ok())
        .count();
    assert_eq!(edges, 7);
}

#[rstest]
fn terminal_states_have_no_successors() {
    for status in ShipmentStatus::ALL {
        assert_eq!(
            status.is_terminal(),
            status.allowed_successors().is_empty(),
            "{}",
            status.as_str()
        );
    }
}

#[rstest]
fn cancellation_is_allowed_from_every_non_terminal_state() {
    for status in ShipmentStatus::ALL
        .into_iter()
        .filter(|status| !status.is_terminal())
    {
        assert!(assert_status_transition(status, Cancelled).is_ok());
    }
}
