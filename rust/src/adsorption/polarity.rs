//! Boundary polarities and dipole orientations.

/// Polarity tag carried by each gap boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Polarity {
    Plus,
    Minus,
}

impl Polarity {
    /// Single-character symbol used in `Display` output.
    pub fn symbol(&self) -> char {
        match self {
            Polarity::Plus => '+',
            Polarity::Minus => '-',
        }
    }

    /// The opposite polarity.
    pub fn flipped(&self) -> Polarity {
        match self {
            Polarity::Plus => Polarity::Minus,
            Polarity::Minus => Polarity::Plus,
        }
    }
}

/// Orientation of a deposited dipole, read left to right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// `+` end on the left, `-` end on the right.
    PlusMinus,
    /// `-` end on the left, `+` end on the right.
    MinusPlus,
}

impl Orientation {
    /// Choose an orientation from a uniform draw `u` in `[0, 1)`.
    ///
    /// `PlusMinus` is chosen with probability `p_plus_minus`.
    #[inline]
    pub fn from_draw(u: f64, p_plus_minus: f64) -> Self {
        if u < p_plus_minus {
            Orientation::PlusMinus
        } else {
            Orientation::MinusPlus
        }
    }

    /// Polarity of the dipole's left end.
    ///
    /// This becomes the right boundary of the left child gap.
    pub fn left_end(&self) -> Polarity {
        match self {
            Orientation::PlusMinus => Polarity::Plus,
            Orientation::MinusPlus => Polarity::Minus,
        }
    }

    /// Polarity of the dipole's right end.
    pub fn right_end(&self) -> Polarity {
        self.left_end().flipped()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_from_draw() {
        assert_eq!(Orientation::from_draw(0.0, 0.5), Orientation::PlusMinus);
        assert_eq!(Orientation::from_draw(0.5, 0.5), Orientation::MinusPlus);
        assert_eq!(Orientation::from_draw(0.999, 1.0), Orientation::PlusMinus);
        assert_eq!(Orientation::from_draw(0.0, 0.0), Orientation::MinusPlus);
    }

    #[test]
    fn test_dipole_ends() {
        assert_eq!(Orientation::PlusMinus.left_end(), Polarity::Plus);
        assert_eq!(Orientation::PlusMinus.right_end(), Polarity::Minus);
        assert_eq!(Orientation::MinusPlus.left_end(), Polarity::Minus);
        assert_eq!(Orientation::MinusPlus.right_end(), Polarity::Plus);
    }
}
