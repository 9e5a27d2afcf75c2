//! Gap representation and the deposition split table.
//!
//! A gap is an unoccupied stretch of the line bounded by two polarised ends.
//! Gaps are plain values: depositing into a gap yields two new gaps and
//! leaves the parent untouched.

use super::polarity::{Orientation, Polarity};

/// Length occupied by one deposited dipole.
pub const DIPOLE_LENGTH: f64 = 1.0;

/// Free sub-interval between two polarised boundaries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gap {
    left: Polarity,
    free_length: f64,
    right: Polarity,
}

impl Gap {
    pub fn new(left: Polarity, free_length: f64, right: Polarity) -> Self {
        Self {
            left,
            free_length,
            right,
        }
    }

    /// The whole domain before any deposition: `(+, length, -)`.
    pub fn domain(length: f64) -> Self {
        Self::new(Polarity::Plus, length, Polarity::Minus)
    }

    #[inline]
    pub fn left(&self) -> Polarity {
        self.left
    }

    #[inline]
    pub fn right(&self) -> Polarity {
        self.right
    }

    #[inline]
    pub fn free_length(&self) -> f64 {
        self.free_length
    }

    /// Whether a dipole fits in this gap.
    ///
    /// Once false it stays false: children only ever receive a share of
    /// `free_length - 1`.
    #[inline]
    pub fn can_deposit(&self) -> bool {
        self.free_length >= DIPOLE_LENGTH
    }

    /// Deposit one dipole with the given orientation and return the
    /// `(left, right)` child gaps.
    ///
    /// Same-sign boundaries push the whole remainder to one side; mixed
    /// boundaries split it in half. Callers must check `can_deposit` first.
    pub fn split(&self, orientation: Orientation) -> (Gap, Gap) {
        debug_assert!(self.can_deposit(), "split on a gap shorter than a dipole");

        let rest = self.free_length - DIPOLE_LENGTH;
        let half = rest / 2.0;

        let (left_free, right_free) = match (orientation, self.left, self.right) {
            (Orientation::PlusMinus, Polarity::Plus, Polarity::Plus) => (rest, 0.0),
            (Orientation::PlusMinus, Polarity::Plus, Polarity::Minus) => (half, half),
            (Orientation::PlusMinus, Polarity::Minus, Polarity::Plus) => (half, half),
            (Orientation::PlusMinus, Polarity::Minus, Polarity::Minus) => (0.0, rest),
            (Orientation::MinusPlus, Polarity::Plus, Polarity::Plus) => (0.0, rest),
            (Orientation::MinusPlus, Polarity::Plus, Polarity::Minus) => (half, half),
            (Orientation::MinusPlus, Polarity::Minus, Polarity::Plus) => (half, half),
            (Orientation::MinusPlus, Polarity::Minus, Polarity::Minus) => (rest, 0.0),
        };

        (
            Gap::new(self.left, left_free, orientation.left_end()),
            Gap::new(orientation.right_end(), right_free, self.right),
        )
    }
}

impl std::fmt::Display for Gap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {}, {})",
            self.left.symbol(),
            self.free_length,
            self.right.symbol()
        )
    }
}
