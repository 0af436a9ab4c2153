//! Payment records, providers, and confirmation rules.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::webhook::VerifiedWebhook;
use super::{Amount, Error, ErrorCode, PaymentId, ShipmentId};

/// Largest accepted gap between a payment and the agreed price (MWK 1).
pub const PAYMENT_TOLERANCE: Amount = Amount::from_tambala(100);

/// Mobile-money providers that post payment webhooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentProvider {
    AirtelMoney,
    TnmMpamba,
}

impl PaymentProvider {
    /// Every provider, in a stable order.
    pub const ALL: [Self; 2] = [Self::AirtelMoney, Self::TnmMpamba];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AirtelMoney => "airtel_money",
            Self::TnmMpamba => "tnm_mpamba",
        }
    }
}

impl fmt::Display for PaymentProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentProvider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "airtel_money" | "airtel" => Ok(Self::AirtelMoney),
            "tnm_mpamba" | "mpamba" => Ok(Self::TnmMpamba),
            _ => Err(Error::new(
                ErrorCode::UnknownPaymentProvider,
                "unknown payment provider",
            )),
        }
    }
}

/// Lifecycle state of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Confirmed,
    Failed,
    Refunded,
}

impl PaymentStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Failed => "failed",
            Self::Refunded => "refunded",
        }
    }
}

/// Persisted payment state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRecord {
    pub id: PaymentId,
    pub shipment_id: ShipmentId,
    pub provider: PaymentProvider,
    /// Transaction reference issued by the provider.
    pub reference: String,
    pub amount: Amount,
    pub status: PaymentStatus,
}

/// Amount must be positive and within [`PAYMENT_TOLERANCE`] of the agreed price.
pub fn assert_valid_amount(amount: Amount, agreed_price: Amount) -> Result<(), Error> {
    if !amount.is_positive() {
        return Err(Error::new(
            ErrorCode::NonPositiveAmount,
            "payment amount must be greater than zero",
        ));
    }
    if amount.abs_diff(agreed_price) > PAYMENT_TOLERANCE {
        return Err(Error::new(
            ErrorCode::AmountMismatch,
            format!("payment of {amount} does not match agreed price of {agreed_price}"),
        ));
    }
    Ok(())
}

/// Reject payment status changes outside the allowed edges.
///
/// Confirmation additionally needs proof that a webhook from the payment's own
/// provider was authenticated and that it names this payment's reference.
pub fn assert_payment_transition(
    payment: &PaymentRecord,
    to: PaymentStatus,
    proof: Option<&VerifiedWebhook>,
) -> Result<(), Error> {
    use PaymentStatus::{Confirmed, Failed, Pending, Refunded};

    match (payment.status, to) {
        (Pending, Confirmed) => match proof {
            Some(webhook) if webhook.provider() == payment.provider => {
                if webhook.reference() == Some(payment.reference.as_str()) {
                    Ok(())
                } else {
                    Err(Error::new(
                        ErrorCode::WebhookNotVerified,
                        "webhook does not reference this payment",
                    ))
                }
            }
            _ => Err(Error::new(
                ErrorCode::WebhookNotVerified,
                "payment can only be confirmed by a verified provider webhook",
            )),
        },
        (Pending, Failed) | (Confirmed, Refunded) => Ok(()),
        (from, to) => Err(Error::new(
            ErrorCode::InvalidPaymentTransition,
            format!(
                "payment cannot move from {} to {}",
                from.as_str(),
                to.as_str()
            ),
        )),
    }
}
