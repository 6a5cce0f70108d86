//! Strongly-typed identifiers.

use std::fmt;

/// Index of a coupling timestep, counted from zero.
///
/// Timestep `t` consumes driving data at index `t` and produces the
/// state that timestep `t + 1` reads as its previous state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimestepId(pub u64);

impl fmt::Display for TimestepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TimestepId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}
