//! Authentication and authorisation preconditions.
//!
//! Handlers call these at the top of every protected operation, before any
//! invariant enforcer runs. None of them mutate state.

use super::{Error, ErrorCode, Role, UserId, VerificationStatus};

/// Identity established by the authentication layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: UserId,
    pub role: Role,
    pub verification: VerificationStatus,
}

/// Per-request security context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthContext {
    principal: Option<Principal>,
}

impl AuthContext {
    /// Context for a request carrying a valid session.
    #[must_use]
    pub fn authenticated(principal: Principal) -> Self {
        Self {
            principal: Some(principal),
        }
    }

    /// Context for a request without credentials.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }
}

/// Return the caller's principal or fail with `unauthenticated`.
pub fn require_authenticated(ctx: &AuthContext) -> Result<&Principal, Error> {
    ctx.principal()
        .ok_or_else(|| Error::unauthenticated("authentication required"))
}

/// Require the caller to hold one of `allowed`.
///
/// Admins get no implicit pass; list [`Role::Admin`] explicitly when they
/// should be let through.
pub fn require_role<'a>(ctx: &'a AuthContext, allowed: &[Role]) -> Result<&'a Principal, Error> {
    let principal = require_authenticated(ctx)?;
    if !allowed.contains(&principal.role) {
        return Err(Error::insufficient_role(format!(
            "role {} may not perform this action",
            principal.role
        )));
    }
    Ok(principal)
}

/// Require a fully verified account.
pub fn require_verified(ctx: &AuthContext) -> Result<&Principal, Error> {
    let principal = require_authenticated(ctx)?;
    if principal.verification != VerificationStatus::Verified {
        return Err(Error::insufficient_role("account must be verified"));
    }
    Ok(principal)
}

/// Require the caller to own the resource, or be an admin.
pub fn require_owner_or_admin<'a>(
    ctx: &'a AuthContext,
    owner: &UserId,
) -> Result<&'a Principal, Error> {
    let principal = require_authenticated(ctx)?;
    if principal.role != Role::Admin && principal.user_id != *owner {
        return Err(Error::new(
            ErrorCode::NotOwner,
            "resource belongs to another user",
        ));
    }
    Ok(principal)
}
