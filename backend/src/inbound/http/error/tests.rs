//! Tests for HTTP error mapping.

use super::*;
use crate::domain::ErrorCode;
use actix_web::body::to_bytes;
use rstest::rstest;
use serde_json::{Value, json};

async fn body_of(error: &Error) -> (StatusCode, Value) {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let body = serde_json::from_slice(&bytes).expect("error body is JSON");
    (status, body)
}

#[rstest]
#[case(ErrorCode::OutOfRegion, StatusCode::BAD_REQUEST)]
#[case(ErrorCode::Unauthenticated, StatusCode::UNAUTHORIZED)]
#[case(ErrorCode::InvalidWebhookSignature, StatusCode::UNAUTHORIZED)]
#[case(ErrorCode::NotOwner, StatusCode::FORBIDDEN)]
#[case(ErrorCode::ShipmentNotFound, StatusCode::NOT_FOUND)]
#[case(ErrorCode::ActiveMatchExists, StatusCode::CONFLICT)]
#[case(ErrorCode::InternalError, StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_kind(#[case] code: ErrorCode, #[case] expected: StatusCode) {
    let err = Error::new(code, "boom");
    assert_eq!(ResponseError::status_code(&err), expected);
    assert_eq!(expected.as_u16(), err.http_status());
}

#[rstest]
#[actix_web::test]
async fn body_carries_error_and_code() {
    let err = Error::new(
        ErrorCode::ActiveMatchExists,
        "shipment already has an active match",
    );
    let (status, body) = body_of(&err).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body,
        json!({
            "error": "shipment already has an active match",
            "code": "active_match_exists"
        })
    );
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted() {
    let err = Error::internal("connection refused to 10.0.0.5:5432");
    let (status, body) = body_of(&err).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({ "error": "Internal server error", "code": "internal_error" })
    );
}
