//! Read-only persistence ports consulted by the invariant enforcers.
//!
//! Enforcers only ever read through these traits; writes happen in the
//! calling handler once every check has passed. Adapters must still back the
//! checks with database constraints, because a concurrent write can land
//! between a check and the subsequent insert.

mod lookup_error;
mod match_query;
mod rating_query;
mod shipment_query;
mod user_directory;

pub use lookup_error::LookupError;
pub use match_query::MatchQuery;
#[cfg(test)]
pub use match_query::MockMatchQuery;
#[cfg(test)]
pub use rating_query::MockRatingQuery;
pub use rating_query::RatingQuery;
#[cfg(test)]
pub use shipment_query::MockShipmentQuery;
pub use shipment_query::ShipmentQuery;
#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::UserDirectory;
