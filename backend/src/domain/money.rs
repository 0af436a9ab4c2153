//! Monetary amounts in Malawi kwacha.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Tambala per kwacha.
const TAMBALA_PER_KWACHA: i64 = 100;

/// Amount of Malawi kwacha, stored in tambala (1/100 MWK).
///
/// Signed so that zero and negative inputs can be represented and rejected
/// by the enforcers rather than silently wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(i64);

impl Amount {
    #[must_use]
    pub const fn from_tambala(tambala: i64) -> Self {
        Self(tambala)
    }

    /// Whole kwacha; saturates rather than overflowing.
    #[must_use]
    pub const fn from_kwacha(kwacha: i64) -> Self {
        Self(kwacha.saturating_mul(TAMBALA_PER_KWACHA))
    }

    #[must_use]
    pub const fn tambala(self) -> i64 {
        self.0
    }

    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Absolute difference between two amounts.
    #[must_use]
    pub const fn abs_diff(self, other: Self) -> Self {
        let diff = self.0.abs_diff(other.0);
        if diff > i64::MAX as u64 {
            Self(i64::MAX)
        } else {
            Self(diff as i64)
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        let per_kwacha = TAMBALA_PER_KWACHA.unsigned_abs();
        write!(
            f,
            "MWK {sign}{}.{:02}",
            magnitude / per_kwacha,
            magnitude % per_kwacha
        )
    }
}
