//! User identity, roles, and verification invariants.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ports::UserDirectory;
use super::{Error, ErrorCode, UserId};

/// Closed set of roles an account can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Shipper,
    Transporter,
    Broker,
    Admin,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Shipper => "shipper",
            Self::Transporter => "transporter",
            Self::Broker => "broker",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "shipper" => Ok(Self::Shipper),
            "transporter" => Ok(Self::Transporter),
            "broker" => Ok(Self::Broker),
            "admin" => Ok(Self::Admin),
            _ => Err(Error::new(
                ErrorCode::UnknownRole,
                "role must be one of shipper, transporter, broker, admin",
            )),
        }
    }
}

/// Account verification state, ordered from least to most trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Unverified,
    Pending,
    Verified,
}

/// Reject any verification change that moves backwards.
///
/// Equal states are accepted as a no-op and forward skips (for example an
/// admin verifying an account directly) are allowed.
pub fn assert_verification_transition(
    from: VerificationStatus,
    to: VerificationStatus,
) -> Result<(), Error> {
    if to < from {
        return Err(Error::new(
            ErrorCode::VerificationRegression,
            format!("verification cannot move from {from:?} back to {to:?}").to_lowercase(),
        ));
    }
    Ok(())
}

/// Malawi country calling code.
const COUNTRY_CODE: &str = "265";
/// Subscriber number length after the country code.
const SUBSCRIBER_DIGITS: usize = 9;

/// Phone number normalised to `+265XXXXXXXXX`.
///
/// Accepts international (`+265…`, `265…`) and local (`0…`) forms. Spaces,
/// dashes, and parentheses are ignored. The subscriber number must have nine
/// digits and start with 1 (landline), 8, or 9 (mobile).
///
/// # Examples
/// ```
/// use matola::domain::PhoneNumber;
///
/// let phone = PhoneNumber::parse("0991 234 567").unwrap();
/// assert_eq!(phone.as_ref(), "+265991234567");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Validate and normalise a raw phone number.
    pub fn parse(raw: &str) -> Result<Self, Error> {
        let compact: String = raw
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
            .collect();

        let subscriber = compact
            .strip_prefix('+')
            .map_or_else(
                || {
                    compact
                        .strip_prefix(COUNTRY_CODE)
                        .or_else(|| compact.strip_prefix('0'))
                },
                |rest| rest.strip_prefix(COUNTRY_CODE),
            )
            .ok_or_else(invalid_phone)?;

        if subscriber.len() != SUBSCRIBER_DIGITS || !subscriber.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid_phone());
        }
        if !matches!(subscriber.as_bytes().first(), Some(b'1' | b'8' | b'9')) {
            return Err(invalid_phone());
        }

        Ok(Self(format!("+{COUNTRY_CODE}{subscriber}")))
    }
}

fn invalid_phone() -> Error {
    Error::new(
        ErrorCode::InvalidPhoneNumber,
        "phone number must be a valid Malawi number",
    )
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<PhoneNumber> for String {
    fn from(value: PhoneNumber) -> Self {
        value.0
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

/// Persisted user state consulted by other enforcers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: UserId,
    pub phone: PhoneNumber,
    pub role: Role,
    pub verification: VerificationStatus,
}

impl UserProfile {
    #[must_use]
    pub fn is_verified(&self) -> bool {
        self.verification == VerificationStatus::Verified
    }
}

/// Sign-up request after parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationDraft {
    pub phone: PhoneNumber,
    pub role: Role,
}

impl RegistrationDraft {
    /// Parse raw sign-up fields.
    pub fn try_from_parts(phone: &str, role: &str) -> Result<Self, Error> {
        Ok(Self {
            phone: PhoneNumber::parse(phone)?,
            role: role.parse()?,
        })
    }
}

/// Fail when another account already owns `phone`.
pub async fn assert_phone_number_available(
    phone: &PhoneNumber,
    directory: &dyn UserDirectory,
) -> Result<(), Error> {
    if directory.phone_number_exists(phone).await? {
        return Err(Error::new(
            ErrorCode::DuplicatePhoneNumber,
            "phone number is already registered",
        ));
    }
    Ok(())
}

/// Checks run before a new account is persisted.
///
/// Admin accounts are provisioned out of band and cannot self-register.
pub async fn assert_can_register(
    draft: &RegistrationDraft,
    directory: &dyn UserDirectory,
) -> Result<(), Error> {
    if draft.role == Role::Admin {
        return Err(Error::insufficient_role(
            "admin accounts cannot be self-registered",
        ));
    }
    assert_phone_number_available(&draft.phone, directory).await
}

#[cfg(test)]
mod tests;
