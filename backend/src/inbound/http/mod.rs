//! HTTP inbound adapter exposing health endpoints and payment webhooks.

pub mod error;
pub mod health;
pub mod state;
pub mod webhooks;

pub use error::ApiResult;
