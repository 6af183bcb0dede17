//! The canonical sum-of-terms form every evaluation reduces to.

use crate::{rational::Rational, symbols};
use std::{
    fmt::{self, Display, Formatter},
    ops::{Add, Neg, Sub},
};

/// A rational coefficient times a product of distinct symbols.
///
/// `symbols` is a bitmask over the fixed pool (see [`crate::symbols`]); a
/// symbol may appear at most once, because the grammar has no exponent
/// notation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Term {
    pub coefficient: Rational,
    pub symbols: u64,
}

impl Term {
    pub fn number(coefficient: Rational) -> Self {
        Term {
            coefficient,
            symbols: 0,
        }
    }

    pub fn symbol(mask: u64) -> Self {
        Term {
            coefficient: Rational::integer(1),
            symbols: mask,
        }
    }

    pub fn is_number(&self) -> bool { self.symbols == 0 }
}

impl Neg for Term {
    type Output = Term;

    fn neg(self) -> Term {
        Term {
            coefficient: -self.coefficient,
            symbols: self.symbols,
        }
    }
}

/// A sum of terms with pairwise-distinct symbol masks.
///
/// Like terms are merged as soon as they meet and terms whose coefficient
/// reduces to zero are dropped, so equal values always hold the same term
/// set. The empty collection denotes zero.
#[derive(Debug, Clone, Default)]
pub struct Canonical {
    terms: Vec<Term>,
}

/// Faults that canonical arithmetic can raise.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Two multiplied terms share a symbol, which would need an exponent.
    RepeatedSymbolInProduct { symbols: u64 },
    /// The divisor still contains symbols or more than one term.
    SymbolicDivisor,
    /// The divisor reduced to exactly zero.
    DivisionByZero,
}

impl Display for EvalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::RepeatedSymbolInProduct { symbols } => {
                let mut names = String::new();
                symbols::append_symbols(*symbols, &mut names);
                write!(f, "repeated symbol in product: {}", names)
            },
            EvalError::SymbolicDivisor => {
                write!(f, "division requires a pure-number divisor")
            },
            EvalError::DivisionByZero => write!(f, "division by zero"),
        }
    }
}

impl std::error::Error for EvalError {}

impl Canonical {
    pub fn zero() -> Self { Canonical::default() }

    pub fn from_term(term: Term) -> Self {
        let mut exp = Canonical::zero();
        exp.merge(term);
        exp
    }

    pub fn terms(&self) -> &[Term] { &self.terms }

    pub fn is_zero(&self) -> bool { self.terms.is_empty() }

    /// Fold `term` into the collection, keeping masks distinct and pruning
    /// zero coefficients.
    fn merge(&mut self, term: Term) {
        if term.coefficient.is_zero() {
            return;
        }

        match self
            .terms
            .iter()
            .position(|existing| existing.symbols == term.symbols)
        {
            Some(index) => {
                let merged = self.terms[index].coefficient + term.coefficient;
                if merged.is_zero() {
                    self.terms.remove(index);
                } else {
                    self.terms[index].coefficient = merged;
                }
            },
            None => self.terms.push(term),
        }
    }

    /// The full cross product of both term sets.
    pub fn mul(&self, rhs: &Canonical) -> Result<Canonical, EvalError> {
        let mut product = Canonical::zero();

        for left in &self.terms {
            for right in &rhs.terms {
                let shared = left.symbols & right.symbols;
                if shared != 0 {
                    return Err(EvalError::RepeatedSymbolInProduct {
                        symbols: shared,
                    });
                }

                product.merge(Term {
                    coefficient: left.coefficient * right.coefficient,
                    symbols: left.symbols | right.symbols,
                });
            }
        }

        Ok(product)
    }

    /// Divide by a value that must have reduced to a single pure number.
    pub fn div(&self, rhs: &Canonical) -> Result<Canonical, EvalError> {
        // zero coefficients are pruned on merge, so a divisor that reduced
        // to zero shows up here as the empty collection
        let divisor = match rhs.terms.as_slice() {
            [] => return Err(EvalError::DivisionByZero),
            [term] if term.is_number() => term.coefficient,
            _ => return Err(EvalError::SymbolicDivisor),
        };

        let mut quotient = Canonical::zero();
        for term in &self.terms {
            let coefficient = term
                .coefficient
                .checked_div(divisor)
                .ok_or(EvalError::DivisionByZero)?;
            quotient.merge(Term {
                coefficient,
                symbols: term.symbols,
            });
        }

        Ok(quotient)
    }
}

impl Add for Canonical {
    type Output = Canonical;

    fn add(self, rhs: Canonical) -> Canonical {
        let mut sum = self;
        for term in rhs.terms {
            sum.merge(term);
        }
        sum
    }
}

impl Sub for Canonical {
    type Output = Canonical;

    fn sub(self, rhs: Canonical) -> Canonical {
        let mut difference = self;
        for term in rhs.terms {
            difference.merge(-term);
        }
        difference
    }
}

impl Neg for Canonical {
    type Output = Canonical;

    fn neg(self) -> Canonical {
        Canonical {
            terms: self.terms.into_iter().map(Neg::neg).collect(),
        }
    }
}

/// Equality over the term *set*; the in-memory order terms were merged in
/// is not significant.
impl PartialEq for Canonical {
    fn eq(&self, other: &Canonical) -> bool {
        self.terms.len() == other.terms.len()
            && self.terms.iter().all(|term| {
                other
                    .terms
                    .iter()
                    .any(|candidate| candidate == term)
            })
    }
}

impl Eq for Canonical {}
