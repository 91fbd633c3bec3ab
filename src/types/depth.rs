//! Search depth type.

use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use crate::error::ProtocolError;

/// Search depth, in plies.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[repr(transparent)]
pub struct Depth(pub i32);

impl Depth {
    pub const ZERO: Depth = Depth(0);
    pub const ONE: Depth = Depth(1);

    /// Depth used when a caller does not ask for one
    pub const DEFAULT: Depth = Depth(3);

    #[inline]
    pub const fn new(d: i32) -> Self {
        Depth(d)
    }

    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// True once the search has used up its plies
    #[inline]
    pub const fn is_exhausted(self) -> bool {
        self.0 <= 0
    }
}

impl Default for Depth {
    fn default() -> Self {
        Depth::DEFAULT
    }
}

impl Sub<i32> for Depth {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: i32) -> Self {
        Depth(self.0 - rhs)
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parses a strictly positive ply count.
impl FromStr for Depth {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<i32>() {
            Ok(d) if d > 0 => Ok(Depth(d)),
            _ => Err(ProtocolError::InvalidDepth(s.to_string())),
        }
    }
}
