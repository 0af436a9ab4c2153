//! Tests for user roles, phone numbers, and verification rules.

use super::*;
use crate::domain::ports::{LookupError, MockUserDirectory};
use rstest::{fixture, rstest};

#[fixture]
fn free_directory() -> MockUserDirectory {
    let mut directory = MockUserDirectory::new();
    directory
        .expect_phone_number_exists()
        .returning(|_| Ok(false));
    directory
}

#[rstest]
#[case("+265991234567", "+265991234567")]
#[case("265 881 234 567", "+265881234567")]
#[case("0991-234-567", "+265991234567")]
#[case("(01) 234 567 89", "+265123456789")]
fn phone_numbers_normalise(#[case] raw: &str, #[case] expected: &str) {
    let phone = PhoneNumber::parse(raw).expect("valid phone number");
    assert_eq!(phone.as_ref(), expected);
}

#[rstest]
#[case("")]
#[case("0991")]
#[case("+254712345678")]
#[case("0991234567890")]
#[case("0591234567")]
#[case("099123456x")]
fn malformed_phone_numbers_are_rejected(#[case] raw: &str) {
    let err = PhoneNumber::parse(raw).expect_err("invalid phone must fail");
    assert_eq!(err.code(), ErrorCode::InvalidPhoneNumber);
}

#[rstest]
#[case("shipper", Role::Shipper)]
#[case("Transporter", Role::Transporter)]
#[case(" broker ", Role::Broker)]
#[case("ADMIN", Role::Admin)]
fn roles_parse_from_closed_set(#[case] raw: &str, #[case] expected: Role) {
    assert_eq!(raw.parse::<Role>().expect("known role"), expected);
}

#[rstest]
#[case("driver")]
#[case("")]
fn unknown_roles_are_rejected(#[case] raw: &str) {
    let err = raw.parse::<Role>().expect_err("unknown role must fail");
    assert_eq!(err.code(), ErrorCode::UnknownRole);
}

#[rstest]
#[case(VerificationStatus::Unverified, VerificationStatus::Pending)]
#[case(VerificationStatus::Pending, VerificationStatus::Verified)]
#[case(VerificationStatus::Unverified, VerificationStatus::Verified)]
#[case(VerificationStatus::Pending, VerificationStatus::Pending)]
fn verification_moves_forward(#[case] from: VerificationStatus, #[case] to: VerificationStatus) {
    assert!(assert_verification_transition(from, to).is_ok());
}

#[rstest]
#[case(VerificationStatus::Verified, VerificationStatus::Pending)]
#[case(VerificationStatus::Verified, VerificationStatus::Unverified)]
#[case(VerificationStatus::Pending, VerificationStatus::Unverified)]
fn verification_never_regresses(#[case] from: VerificationStatus, #[case] to: VerificationStatus) {
    let err = assert_verification_transition(from, to).expect_err("regression must fail");
    assert_eq!(err.code(), ErrorCode::VerificationRegression);
}

#[rstest]
#[tokio::test]
async fn duplicate_phone_number_is_rejected() {
    let mut directory = MockUserDirectory::new();
    directory
        .expect_phone_number_exists()
        .withf(|phone| phone.as_ref() == "+265991234567")
        .times(1)
        .returning(|_| Ok(true));

    let phone = PhoneNumber::parse("0991234567").expect("valid phone");
    let err = assert_phone_number_available(&phone, &directory)
        .await
        .expect_err("duplicate must fail");
    assert_eq!(err.code(), ErrorCode::DuplicatePhoneNumber);
}

#[rstest]
#[tokio::test]
async fn shipper_registration_passes(free_directory: MockUserDirectory) {
    let draft = RegistrationDraft::try_from_parts("0881234567", "shipper").expect("valid draft");
    assert!(assert_can_register(&draft, &free_directory).await.is_ok());
}

#[rstest]
#[tokio::test]
async fn admin_self_registration_is_forbidden(free_directory: MockUserDirectory) {
    let draft = RegistrationDraft::try_from_parts("0881234567", "admin").expect("valid draft");
    let err = assert_can_register(&draft, &free_directory)
        .await
        .expect_err("admin sign-up must fail");
    assert_eq!(err.code(), ErrorCode::InsufficientRole);
}

#[rstest]
#[tokio::test]
async fn directory_failures_surface_as_internal_errors() {
    let mut directory = MockUserDirectory::new();
    directory
        .expect_phone_number_exists()
        .returning(|_| Err(LookupError::connection("pool timed out")));

    let phone = PhoneNumber::parse("0991234567").expect("valid phone");
    let err = assert_phone_number_available(&phone, &directory)
        .await
        .expect_err("lookup failure must propagate");
    assert_eq!(err.code(), ErrorCode::InternalError);
}
