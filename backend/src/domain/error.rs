//! Domain-level error types.
//!
//! These errors are transport agnostic. Every failure raised by the
//! invariant layer carries a stable [`ErrorCode`]; the code belongs to exactly
//! one [`ErrorKind`], and the kind fixes the HTTP status hint that inbound
//! adapters use when building a response.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::error;

use super::ports::LookupError;

/// Failure category shared by a family of error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or out-of-range input.
    Validation,
    /// Authentication is missing.
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    Forbidden,
    /// A referenced entity does not exist.
    NotFound,
    /// The request would break a state-consistency rule.
    InvariantViolation,
    /// An inbound webhook failed authenticity checks.
    SignatureMismatch,
    /// An unexpected failure inside the layer or its collaborators.
    Internal,
}

impl ErrorKind {
    /// HTTP status hint for adapters.
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::Validation => 400,
            Self::Unauthorized | Self::SignatureMismatch => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::InvariantViolation => 409,
            Self::Internal => 500,
        }
    }
}

/// Stable machine-readable error code describing the failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidIdentifier,
    InvalidCoordinate,
    OutOfRegion,
    InvalidPhoneNumber,
    UnknownRole,
    EmptyCargoType,
    NonPositiveWeight,
    NonPositivePrice,
    NonPositiveAmount,
    AmountMismatch,
    InvalidRatingScore,
    RatingCommentTooLong,
    InvalidUssdInput,
    Unauthenticated,
    InvalidWebhookSignature,
    InsufficientRole,
    NotOwner,
    ShipmentNotFound,
    MatchNotFound,
    UnknownPaymentProvider,
    DuplicatePhoneNumber,
    VerificationRegression,
    InvalidShipmentTransition,
    ShipmentNotOpen,
    ActiveMatchExists,
    NotATransporter,
    TransporterNotVerified,
    InvalidMatchTransition,
    InvalidPaymentTransition,
    WebhookNotVerified,
    MatchNotCompleted,
    NotMatchParticipant,
    SelfRating,
    DuplicateRating,
    InternalError,
}

impl ErrorCode {
    /// Category this code belongs to.
    #[must_use]
    pub const fn kind(self) -> ErrorKind {
        match self {
            Self::InvalidIdentifier
            | Self::InvalidCoordinate
            | Self::OutOfRegion
            | Self::InvalidPhoneNumber
            | Self::UnknownRole
            | Self::EmptyCargoType
            | Self::NonPositiveWeight
            | Self::NonPositivePrice
            | Self::NonPositiveAmount
            | Self::AmountMismatch
            | Self::InvalidRatingScore
            | Self::RatingCommentTooLong
            | Self::InvalidUssdInput => ErrorKind::Validation,
            Self::Unauthenticated => ErrorKind::Unauthorized,
            Self::InvalidWebhookSignature => ErrorKind::SignatureMismatch,
            Self::InsufficientRole | Self::NotOwner => ErrorKind::Forbidden,
            Self::ShipmentNotFound | Self::MatchNotFound | Self::UnknownPaymentProvider => {
                ErrorKind::NotFound
            }
            Self::DuplicatePhoneNumber
            | Self::VerificationRegression
            | Self::InvalidShipmentTransition
            | Self::ShipmentNotOpen
            | Self::ActiveMatchExists
            | Self::NotATransporter
            | Self::TransporterNotVerified
            | Self::InvalidMatchTransition
            | Self::InvalidPaymentTransition
            | Self::WebhookNotVerified
            | Self::MatchNotCompleted
            | Self::NotMatchParticipant
            | Self::SelfRating
            | Self::DuplicateRating => ErrorKind::InvariantViolation,
            Self::InternalError => ErrorKind::Internal,
        }
    }

    /// Generic description used when a caller supplies a blank message.
    const fn fallback_message(self) -> &'static str {
        match self.kind() {
            ErrorKind::Validation => "request failed validation",
            ErrorKind::Unauthorized => "authentication required",
            ErrorKind::Forbidden => "operation not permitted",
            ErrorKind::NotFound => "resource not found",
            ErrorKind::InvariantViolation => "operation conflicts with current state",
            ErrorKind::SignatureMismatch => "webhook signature could not be verified",
            ErrorKind::Internal => "Internal server error",
        }
    }
}

/// Domain error payload.
///
/// ## Invariants
/// - `message` is non-empty once trimmed of whitespace.
///
/// Serialises as `{"error": <message>, "code": <code>}`.
///
/// # Examples
/// ```
/// use matola::domain::{Error, ErrorCode};
///
/// let err = Error::new(ErrorCode::OutOfRegion, "origin is outside Malawi");
/// assert_eq!(err.code(), ErrorCode::OutOfRegion);
/// assert_eq!(err.http_status(), 400);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ErrorDto", into = "ErrorDto")]
pub struct Error {
    code: ErrorCode,
    message: String,
}

/// Validation errors emitted when decoding an [`Error`] payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorValidationError {
    #[error("error message must not be empty")]
    EmptyMessage,
}

impl Error {
    /// Create a new error.
    ///
    /// Blank messages are replaced with a generic description of the code's
    /// category so the payload invariant always holds.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            return Self {
                code,
                message: code.fallback_message().to_owned(),
            };
        }
        Self { code, message }
    }

    /// Fallible constructor that rejects blank messages.
    pub fn try_new(
        code: ErrorCode,
        message: impl Into<String>,
    ) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self { code, message })
    }

    /// Stable machine-readable error code.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Failure category.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.code.kind()
    }

    /// HTTP status hint for adapters.
    #[must_use]
    pub fn http_status(&self) -> u16 {
        self.kind().http_status()
    }

    /// Human-readable message returned to adapters.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Convenience constructor for [`ErrorCode::Unauthenticated`].
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthenticated, message)
    }

    /// Convenience constructor for [`ErrorCode::InsufficientRole`].
    pub fn insufficient_role(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InsufficientRole, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

impl From<LookupError> for Error {
    fn from(err: LookupError) -> Self {
        // Adapter detail stays in the logs.
        error!(error = %err, "persistence lookup failed during invariant check");
        Self::internal("persistence lookup failed")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorDto {
    error: String,
    code: ErrorCode,
}

impl From<Error> for ErrorDto {
    fn from(value: Error) -> Self {
        Self {
            error: value.message,
            code: value.code,
        }
    }
}

impl TryFrom<ErrorDto> for Error {
    type Error = ErrorValidationError;

    fn try_from(value: ErrorDto) -> Result<Self, Self::Error> {
        Self::try_new(value.code, value.error)
    }
}
