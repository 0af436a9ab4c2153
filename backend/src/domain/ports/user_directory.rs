//! Port for user lookups needed by registration checks.

use async_trait::async_trait;

use crate::domain::PhoneNumber;

use super::LookupError;

/// Read-only view over registered users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Whether any account already uses the normalised phone number.
    async fn phone_number_exists(&self, phone: &PhoneNumber) -> Result<bool, LookupError>;
}
