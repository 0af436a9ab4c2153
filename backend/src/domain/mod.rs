//! Domain primitives and invariant enforcers.
//!
//! Purpose: validate Matola entities and their state transitions before a
//! handler persists anything. Every check either returns `Ok` or a typed
//! [`Error`] whose [`ErrorCode`] and HTTP status hint let adapters build a
//! response without re-deriving semantics.
//!
//! Public surface:
//! - `geo`: region bounding box, haversine distance, district catalogue.
//! - `webhook`: HMAC-SHA256 signatures for payment-provider callbacks.
//! - `user`, `shipment`, `matching`, `payment`, `rating`, `ussd`: one
//!   enforcer per entity.
//! - `security`: authentication and role preconditions.
//! - `ports`: read-only persistence lookups used by the enforcers.

pub mod error;
pub mod geo;
pub mod ids;
pub mod matching;
pub mod money;
pub mod payment;
pub mod ports;
pub mod rating;
pub mod security;
pub mod shipment;
pub mod user;
pub mod ussd;
pub mod webhook;

pub use self::error::{Error, ErrorCode, ErrorKind, ErrorValidationError};
pub use self::geo::{Coordinate, District};
pub use self::ids::{MatchId, PaymentId, ShipmentId, UserId};
pub use self::matching::{MatchRecord, MatchStatus};
pub use self::money::Amount;
pub use self::payment::{PaymentProvider, PaymentRecord, PaymentStatus};
pub use self::rating::{RatingDraft, RatingScore};
pub use self::security::{AuthContext, Principal};
pub use self::shipment::{ShipmentDraft, ShipmentSnapshot, ShipmentStatus};
pub use self::user::{PhoneNumber, RegistrationDraft, Role, UserProfile, VerificationStatus};
pub use self::webhook::{VerifiedWebhook, WebhookSecrets, WebhookVerifier};
