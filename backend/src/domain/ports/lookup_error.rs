//! Error type shared by all read-only persistence ports.

use thiserror::Error;

/// Errors raised by persistence adapters while answering a lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The backing store could not be reached.
    #[error("persistence connection failed: {message}")]
    Connection { message: String },
    /// The store was reached but the query failed.
    #[error("persistence query failed: {message}")]
    Query { message: String },
}

impl LookupError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Error, ErrorCode};
    use rstest::rstest;

    #[rstest]
    #[case(
        LookupError::connection("pool closed"),
        "persistence connection failed: pool closed"
    )]
    #[case(
        LookupError::query("relation missing"),
        "persistence query failed: relation missing"
    )]
    fn display_names_the_failing_stage(#[case] err: LookupError, #[case] expected: &str) {
        assert_eq!(err.to_string(), expected);
    }

    #[rstest]
    fn domain_error_hides_adapter_detail() {
        let err = Error::from(LookupError::query("select * from users"));
        assert_eq!(err.code(), ErrorCode::InternalError);
        assert!(!err.message().contains("users"));
    }
}
