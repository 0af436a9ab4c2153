//! Matola invariant-enforcement layer.
//!
//! `domain` holds the validators and enforcers that every write path runs
//! before persisting. `inbound` exposes the HTTP surface (health endpoints and
//! signed payment webhooks), `middleware` the request correlation layer, and
//! `settings` the OrthoConfig-backed runtime configuration.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod settings;

pub use middleware::RequestTrace;
