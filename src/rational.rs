use std::{
    fmt::{self, Display, Formatter},
    ops::{Add, Mul, Neg, Sub},
};

/// An exact fraction of two machine integers, always kept in lowest terms.
///
/// The sign lives in the numerator; the denominator is strictly positive.
/// An integer is a [`Rational`] with denominator `1`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Rational {
    numerator: i64,
    denominator: i64,
}

impl Rational {
    /// Create a reduced fraction.
    ///
    /// # Panics
    ///
    /// Panics if `denominator` is zero. Callers that cannot rule a zero
    /// denominator out should go through [`Rational::checked_div`] instead.
    pub fn new(numerator: i64, denominator: i64) -> Self {
        assert_ne!(denominator, 0, "a rational can't have a zero denominator");
        Rational {
            numerator,
            denominator,
        }
        .reduced()
    }

    pub const fn integer(value: i64) -> Self {
        Rational {
            numerator: value,
            denominator: 1,
        }
    }

    pub fn numerator(self) -> i64 { self.numerator }

    pub fn denominator(self) -> i64 { self.denominator }

    pub fn is_integer(self) -> bool { self.denominator == 1 }

    pub fn is_zero(self) -> bool { self.numerator == 0 }

    pub fn is_negative(self) -> bool { self.numerator < 0 }

    /// Divide two rationals, reporting a zero divisor instead of panicking.
    pub fn checked_div(self, other: Rational) -> Option<Rational> {
        if other.numerator == 0 {
            return None;
        }

        Some(
            Rational {
                numerator: self.numerator * other.denominator,
                denominator: self.denominator * other.numerator,
            }
            .reduced(),
        )
    }

    fn reduced(self) -> Self {
        let Rational {
            mut numerator,
            mut denominator,
        } = self;

        if denominator < 0 {
            numerator = -numerator;
            denominator = -denominator;
        }

        if numerator == 0 {
            return Rational::integer(0);
        }

        let divisor = gcd(numerator.abs(), denominator);
        Rational {
            numerator: numerator / divisor,
            denominator: denominator / divisor,
        }
    }
}

fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a, b);
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

impl Add for Rational {
    type Output = Rational;

    fn add(self, rhs: Rational) -> Rational {
        // integers never need the cross-multiply or the reduction
        if self.denominator == 1 && rhs.denominator == 1 {
            return Rational::integer(self.numerator + rhs.numerator);
        }

        Rational {
            numerator: self.numerator * rhs.denominator
                + self.denominator * rhs.numerator,
            denominator: self.denominator * rhs.denominator,
        }
        .reduced()
    }
}

impl Sub for Rational {
    type Output = Rational;

    fn sub(self, rhs: Rational) -> Rational {
        if self.denominator == 1 && rhs.denominator == 1 {
            return Rational::integer(self.numerator - rhs.numerator);
        }

        Rational {
            numerator: self.numerator * rhs.denominator
                - self.denominator * rhs.numerator,
            denominator: self.denominator * rhs.denominator,
        }
        .reduced()
    }
}

impl Mul for Rational {
    type Output = Rational;

    fn mul(self, rhs: Rational) -> Rational {
        if self.denominator == 1 && rhs.denominator == 1 {
            return Rational::integer(self.numerator * rhs.numerator);
        }

        Rational {
            numerator: self.numerator * rhs.numerator,
            denominator: self.denominator * rhs.denominator,
        }
        .reduced()
    }
}

impl Neg for Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        Rational {
            numerator: -self.numerator,
            denominator: self.denominator,
        }
    }
}

impl From<i64> for Rational {
    fn from(value: i64) -> Self { Rational::integer(value) }
}

impl Display for Rational {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.denominator == 1 {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_reduces_and_normalizes_sign() {
        let inputs = vec![
            (Rational::new(2, 4), (1, 2)),
            (Rational::new(-2, 4), (-1, 2)),
            (Rational::new(2, -4), (-1, 2)),
            (Rational::new(-2, -4), (1, 2)),
            (Rational::new(0, -7), (0, 1)),
            (Rational::new(1, 11), (1, 11)),
        ];

        for (got, (n, d)) in inputs {
            assert_eq!((got.numerator(), got.denominator()), (n, d));
        }
    }

    #[test]
    fn integer_fast_paths() {
        assert_eq!(
            Rational::integer(2) + Rational::integer(3),
            Rational::integer(5)
        );
        assert_eq!(
            Rational::integer(2) - Rational::integer(3),
            Rational::integer(-1)
        );
        assert_eq!(
            Rational::integer(2) * Rational::integer(3),
            Rational::integer(6)
        );
    }

    #[test]
    fn arithmetic_stays_reduced() {
        assert_eq!(
            Rational::new(1, 2) + Rational::new(1, 2),
            Rational::integer(1)
        );
        assert_eq!(
            Rational::new(1, 6) + Rational::new(1, 3),
            Rational::new(1, 2)
        );
        assert_eq!(
            Rational::new(1, 2) - Rational::new(1, 3),
            Rational::new(1, 6)
        );
        assert_eq!(
            Rational::new(2, 3) * Rational::new(3, 4),
            Rational::new(1, 2)
        );
    }

    #[test]
    fn division() {
        assert_eq!(
            Rational::new(1, 2).checked_div(Rational::new(3, 2)),
            Some(Rational::new(1, 3))
        );
        assert_eq!(
            Rational::integer(5).checked_div(Rational::new(-1, 2)),
            Some(Rational::integer(-10))
        );
        assert_eq!(Rational::integer(1).checked_div(Rational::integer(0)), None);
    }

    #[test]
    fn negation_keeps_denominator() {
        let r = -Rational::new(3, 4);
        assert_eq!((r.numerator(), r.denominator()), (-3, 4));
    }
}
