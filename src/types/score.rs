//! Score type for search.
//!
//! Two ranges share this type and must never meet: the evaluation range,
//! capped by the mate sentinel, and the alpha-beta window, whose bounds sit
//! three orders of magnitude further out.

use std::fmt;
use std::ops::{Add, Sub, Neg};

/// Special score values
pub const SCORE_INFINITY: i32 = 10_000_000;
pub const SCORE_MATE: i32 = 10_000;
pub const SCORE_DRAW: i32 = 0;

const _: () = assert!(SCORE_MATE < SCORE_INFINITY / 100);

/// A score in centipawns.
///
/// Evaluation hands out White-relative scores; search converts them to the
/// side-to-move convention before comparing.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Score(pub i32);

impl Score {
    /// Create a new score from centipawns
    #[inline]
    pub const fn cp(centipawns: i32) -> Self {
        Score(centipawns)
    }

    /// Score of a position where White has delivered mate
    #[inline]
    pub const fn mate() -> Self {
        Score(SCORE_MATE)
    }

    /// Draw score
    #[inline]
    pub const fn draw() -> Self {
        Score(SCORE_DRAW)
    }

    /// Infinity (for alpha-beta bounds)
    #[inline]
    pub const fn infinity() -> Self {
        Score(SCORE_INFINITY)
    }

    /// Negative infinity
    #[inline]
    pub const fn neg_infinity() -> Self {
        Score(-SCORE_INFINITY)
    }

    /// Get the raw value
    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// True when the score carries a checkmate sentinel
    #[inline]
    pub const fn is_mate_score(self) -> bool {
        self.0 >= SCORE_MATE || self.0 <= -SCORE_MATE
    }
}

impl Add for Score {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Score(self.0 + rhs.0)
    }
}

impl Sub for Score {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Score(self.0 - rhs.0)
    }
}

impl Neg for Score {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Score(-self.0)
    }
}

impl From<i32> for Score {
    #[inline]
    fn from(v: i32) -> Self {
        Score(v)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cp {}", self.0)
    }
}

impl fmt::Debug for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Score({})", self.0)
    }
}
