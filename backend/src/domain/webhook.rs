//! HMAC-SHA256 authenticity checks for payment-provider webhooks.
//!
//! Verification fails closed: a missing secret, a malformed signature, and a
//! mismatch all yield `false` rather than an error, so callers treat every
//! "not verified" outcome the same way.

use std::fmt;

use hmac::{Hmac, Mac};
use serde_json::Value;
use sha2::Sha256;
use tracing::{debug, warn};
use zeroize::Zeroizing;

use super::{Error, ErrorCode, PaymentProvider};

type HmacSha256 = Hmac<Sha256>;

/// Optional prefix some providers put in front of the hex digest.
const SIGNATURE_PREFIX: &str = "sha256=";

fn keyed_mac(secret: &str) -> Option<HmacSha256> {
    HmacSha256::new_from_slice(secret.as_bytes()).ok()
}

/// Lowercase hex HMAC-SHA256 digest of `payload` under `secret`.
///
/// # Examples
/// ```
/// use matola::domain::webhook::{generate_signature, verify_provider_webhook};
///
/// let payload = r#"{"amount":100}"#;
/// let signature = generate_signature(payload, "secretA");
/// assert!(verify_provider_webhook(payload, &signature, Some("secretA")));
/// assert!(!verify_provider_webhook(payload, &signature, Some("secretB")));
/// ```
#[must_use]
pub fn generate_signature(payload: &str, secret: &str) -> String {
    // HMAC accepts keys of any length, so the empty fallback never occurs in
    // practice and would never verify if it did.
    keyed_mac(secret)
        .map(|mut mac| {
            mac.update(payload.as_bytes());
            hex::encode(mac.finalize().into_bytes())
        })
        .unwrap_or_default()
}

/// Check `signature` against the HMAC of the exact `payload` bytes.
///
/// The signature is hex in either case and may carry a `sha256=` prefix. The
/// digest comparison runs in constant time. Returns `false` when the secret
/// is absent or empty.
#[must_use]
pub fn verify_provider_webhook(payload: &str, signature: &str, secret: Option<&str>) -> bool {
    let Some(secret) = secret.filter(|value| !value.is_empty()) else {
        return false;
    };
    let supplied = signature.trim();
    let supplied = supplied.strip_prefix(SIGNATURE_PREFIX).unwrap_or(supplied);
    let Ok(tag) = hex::decode(supplied) else {
        return false;
    };
    let Some(mut mac) = keyed_mac(secret) else {
        return false;
    };
    mac.update(payload.as_bytes());
    mac.verify_slice(&tag).is_ok()
}

/// Per-provider webhook secrets, built once at start-up and injected.
#[derive(Clone, Default)]
pub struct WebhookSecrets {
    airtel_money: Option<Zeroizing<String>>,
    tnm_mpamba: Option<Zeroizing<String>>,
}

impl WebhookSecrets {
    /// Build from optional raw values; blank values count as unset.
    #[must_use]
    pub fn new(airtel_money: Option<String>, tnm_mpamba: Option<String>) -> Self {
        fn keep(value: Option<String>) -> Option<Zeroizing<String>> {
            value
                .filter(|secret| !secret.trim().is_empty())
                .map(Zeroizing::new)
        }
        Self {
            airtel_money: keep(airtel_money),
            tnm_mpamba: keep(tnm_mpamba),
        }
    }

    /// Secret configured for `provider`, if any.
    #[must_use]
    pub fn secret_for(&self, provider: PaymentProvider) -> Option<&str> {
        let secret = match provider {
            PaymentProvider::AirtelMoney => self.airtel_money.as_ref(),
            PaymentProvider::TnmMpamba => self.tnm_mpamba.as_ref(),
        };
        secret.map(|value| value.as_str())
    }

    /// Providers whose callbacks can currently be verified.
    #[must_use]
    pub fn configured_providers(&self) -> Vec<PaymentProvider> {
        PaymentProvider::ALL
            .into_iter()
            .filter(|provider| self.secret_for(*provider).is_some())
            .collect()
    }
}

impl fmt::Debug for WebhookSecrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookSecrets")
            .field(
                "airtel_money",
                &self.airtel_money.as_ref().map(|_| "<redacted>"),
            )
            .field(
                "tnm_mpamba",
                &self.tnm_mpamba.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// Transaction reference named by an authenticated payload.
///
/// Airtel Money nests it as `transaction.id`; Mpamba sends a top-level
/// `reference`. Anything else, including a body that is not JSON, has none.
fn transaction_reference(payload: &str) -> Option<String> {
    let body: Value = serde_json::from_str(payload).ok()?;
    body.get("reference")
        .or_else(|| body.pointer("/transaction/id"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|reference| !reference.is_empty())
        .map(str::to_owned)
}

/// Proof that a webhook payload passed signature verification.
///
/// Only [`WebhookVerifier::verify`] can construct one, so code holding a
/// `VerifiedWebhook` knows the payload was authenticated. The reference is
/// read from the authenticated bytes, so it ties the proof to one payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedWebhook {
    provider: PaymentProvider,
    reference: Option<String>,
}

impl VerifiedWebhook {
    /// Provider whose secret authenticated the payload.
    #[must_use]
    pub fn provider(&self) -> PaymentProvider {
        self.provider
    }

    /// Provider transaction reference carried by the payload, if any.
    #[must_use]
    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }
}

/// Verifies inbound webhooks against the configured provider secrets.
#[derive(Debug, Clone, Default)]
pub struct WebhookVerifier {
    secrets: WebhookSecrets,
}

impl WebhookVerifier {
    #[must_use]
    pub fn new(secrets: WebhookSecrets) -> Self {
        Self { secrets }
    }

    /// See [`WebhookSecrets::configured_providers`].
    #[must_use]
    pub fn configured_providers(&self) -> Vec<PaymentProvider> {
        self.secrets.configured_providers()
    }

    /// Authenticate a webhook, returning a proof token on success.
    pub fn verify(
        &self,
        provider: PaymentProvider,
        payload: &str,
        signature: &str,
    ) -> Result<VerifiedWebhook, Error> {
        let secret = self.secrets.secret_for(provider);
        if secret.is_none() {
            warn!(provider = %provider, "webhook secret not configured; rejecting callback");
        }
        if verify_provider_webhook(payload, signature, secret) {
            return Ok(VerifiedWebhook {
                provider,
                reference: transaction_reference(payload),
            });
        }
        debug!(provider = %provider, "webhook signature rejected");
        Err(Error::new(
            ErrorCode::InvalidWebhookSignature,
            "webhook signature could not be verified",
        ))
    }
}
