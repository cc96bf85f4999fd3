//! Schedule timestamps.
//!
//! Timestamps arrive as plain integers (epoch-like). They carry no unit
//! or timezone: the planner only ever compares them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An instant in a flight schedule.
///
/// # Examples
///
/// ```
/// use flight_server::domain::Timestamp;
///
/// let boarding = Timestamp::new(1_700_000_000);
/// let later = Timestamp::new(1_700_003_600);
/// assert!(boarding < later);
/// assert_eq!(later.value(), 1_700_003_600);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Create a timestamp from its raw value.
    pub const fn new(value: i64) -> Self {
        Timestamp(value)
    }

    /// Returns the raw integer value.
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl From<i64> for Timestamp {
    fn from(value: i64) -> Self {
        Timestamp(value)
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({})", self.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
