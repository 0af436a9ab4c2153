//! Stable UUID identifiers for Matola entities.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Error, ErrorCode};

macro_rules! define_uuid_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Parse an identifier from its canonical string form.
            pub fn new(id: impl AsRef<str>) -> Result<Self, Error> {
                let raw = id.as_ref();
                if raw.trim() != raw || raw.is_empty() {
                    return Err(Error::new(
                        ErrorCode::InvalidIdentifier,
                        concat!($label, " id must be a valid UUID"),
                    ));
                }
                Uuid::parse_str(raw).map(Self).map_err(|_| {
                    Error::new(
                        ErrorCode::InvalidIdentifier,
                        concat!($label, " id must be a valid UUID"),
                    )
                })
            }

            /// Generate a new random identifier.
            #[must_use]
            pub fn random() -> Self {
                Self(Uuid::new_v4())
            }

            /// Access the underlying UUID.
            #[must_use]
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

define_uuid_id!(
    /// Identifier of a registered user of any role.
    UserId,
    "user"
);
define_uuid_id!(
    /// Identifier of a posted shipment.
    ShipmentId,
    "shipment"
);
define_uuid_id!(
    /// Identifier of a shipment-to-transporter match.
    MatchId,
    "match"
);
define_uuid_id!(
    /// Identifier of a payment record.
    PaymentId,
    "payment"
);
