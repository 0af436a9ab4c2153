//! Payment-provider webhook endpoint.
//!
//! ```text
//! POST /api/v1/webhooks/{provider}
//! X-Webhook-Signature: <hex HMAC-SHA256 of the raw body>
//! ```
//!
//! The body is authenticated byte for byte before anything reads it. Unknown
//! providers get 404 and bad signatures 401; nothing about the configured
//! secrets leaks into either response.

use actix_web::{HttpRequest, HttpResponse, post, web};
use serde_json::json;
use tracing::info;

use crate::domain::{Error, ErrorCode, PaymentProvider};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Header carrying the provider's signature.
pub const SIGNATURE_HEADER: &str = "X-Webhook-Signature";

fn signature_of(req: &HttpRequest) -> &str {
    req.headers()
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

/// Accept a signed payment callback.
#[post("/webhooks/{provider}")]
pub async fn receive_payment_webhook(
    state: web::Data<HttpState>,
    provider: web::Path<String>,
    req: HttpRequest,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let provider: PaymentProvider = provider.as_str().parse()?;
    let payload = std::str::from_utf8(&body).map_err(|_| {
        Error::new(
            ErrorCode::InvalidWebhookSignature,
            "webhook signature could not be verified",
        )
    })?;
    let proof = state
        .webhooks
        .verify(provider, payload, signature_of(&req))?;
    info!(
        provider = %proof.provider(),
        reference = proof.reference().unwrap_or("<none>"),
        bytes = body.len(),
        "payment webhook accepted"
    );
    Ok(HttpResponse::Ok().json(json!({ "status": "accepted" })))
}
