//! Request middleware.
//!
//! Purpose: request lifecycle concerns shared by every route, currently
//! request correlation for logs.

pub mod request_id;

pub use request_id::{RequestId, RequestTrace};
