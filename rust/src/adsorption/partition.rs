//! Ordered partition of the domain into gaps.
//!
//! Deposited dipoles are implicit: with `n` gaps there are exactly `n - 1`
//! dipoles, one between each pair of neighbouring gaps.

use rand::Rng;

use super::gap::Gap;
use super::polarity::Orientation;

/// Left-to-right sequence of gaps covering the domain.
///
/// Never empty. Each round builds a fresh partition from the previous one
/// instead of editing gaps in place.
#[derive(Clone, Debug, PartialEq)]
pub struct Partition {
    gaps: Vec<Gap>,
}

impl Partition {
    /// Single-gap partition `(+, length, -)`.
    pub fn new(length: f64) -> Self {
        Self {
            gaps: vec![Gap::domain(length)],
        }
    }

    /// Build from an explicit gap sequence. Returns `None` when empty.
    pub fn from_gaps(gaps: Vec<Gap>) -> Option<Self> {
        if gaps.is_empty() {
            None
        } else {
            Some(Self { gaps })
        }
    }

    #[inline]
    pub fn gaps(&self) -> &[Gap] {
        &self.gaps
    }

    /// Number of gaps. Always at least one.
    #[inline]
    pub fn len(&self) -> usize {
        self.gaps.len()
    }

    /// Number of dipoles deposited so far.
    #[inline]
    pub fn deposited(&self) -> usize {
        self.gaps.len() - 1
    }

    /// Sum of free length over all gaps.
    pub fn total_free_length(&self) -> f64 {
        self.gaps.iter().map(Gap::free_length).sum()
    }

    /// Number of gaps that can still take a dipole.
    pub fn open_gaps(&self) -> usize {
        self.gaps.iter().filter(|g| g.can_deposit()).count()
    }

    /// True when no gap can take another dipole.
    pub fn is_jammed(&self) -> bool {
        self.open_gaps() == 0
    }

    /// Apply one deposition round and return the next partition.
    ///
    /// Every gap is judged against `self` as it stood at the start of the
    /// round. Gaps shorter than a dipole are copied through without touching
    /// the generator; every other gap consumes exactly one draw.
    pub fn step<R: Rng + ?Sized>(&self, p_plus_minus: f64, rng: &mut R) -> Partition {
        let mut next = Vec::with_capacity(self.gaps.len() + self.open_gaps());

        for gap in &self.gaps {
            if !gap.can_deposit() {
                next.push(*gap);
                continue;
            }

            let orientation = Orientation::from_draw(rng.gen::<f64>(), p_plus_minus);
            let (left, right) = gap.split(orientation);
            next.push(left);
            next.push(right);
        }

        Partition { gaps: next }
    }
}

impl std::fmt::Display for Partition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.gaps.iter().map(|g| g.to_string()).collect();
        write!(f, "[{}]", parts.join(" | "))
    }
}
