//! Folds a syntax tree into one canonical expression.
//!
//! Evaluation is a post-order walk; every call returns its value instead of
//! funnelling it through shared state, and the tree is left untouched.

use crate::{
    ast::{AddOp, Expr, Fact, MulOp, Num, Symbol, Term, UExpr},
    canon::{Canonical, EvalError, Term as CanonTerm},
    rational::Rational,
    symbols,
};

/// Reduce a parsed expression to its canonical sum-of-terms form.
pub fn evaluate(expr: &Expr) -> Result<Canonical, EvalError> {
    eval_expr(expr)
}

fn eval_expr(expr: &Expr) -> Result<Canonical, EvalError> {
    let mut total = eval_term(&expr.first)?;

    for (op, term) in &expr.rest {
        let value = eval_term(term)?;
        total = match op {
            AddOp::Plus => total + value,
            AddOp::Minus => total - value,
        };
    }

    Ok(total)
}

fn eval_term(term: &Term) -> Result<Canonical, EvalError> {
    let mut total = eval_uexpr(&term.first)?;

    for (op, operand) in &term.rest {
        let value = eval_uexpr(operand)?;
        total = match op {
            MulOp::Times => total.mul(&value)?,
            MulOp::Divide => total.div(&value)?,
        };
    }

    Ok(total)
}

fn eval_uexpr(uexpr: &UExpr) -> Result<Canonical, EvalError> {
    let value = eval_fact(&uexpr.fact)?;

    Ok(match uexpr.sign {
        Some(AddOp::Minus) => -value,
        _ => value,
    })
}

fn eval_fact(fact: &Fact) -> Result<Canonical, EvalError> {
    match fact {
        Fact::Grouped(inner) => eval_expr(inner),
        Fact::Number { num, symbols } => {
            let value = eval_num(num)?;
            if symbols.is_empty() {
                Ok(value)
            } else {
                value.mul(&symbol_product(symbols)?)
            }
        },
        Fact::Symbols(symbols) => symbol_product(symbols),
    }
}

fn eval_num(num: &Num) -> Result<Canonical, EvalError> {
    match num {
        Num::Literal(value) => Ok(Canonical::from_term(CanonTerm::number(
            Rational::integer(*value),
        ))),
        Num::Frac(frac) => {
            let numerator = eval_expr(&frac.numerator)?;
            let denominator = eval_expr(&frac.denominator)?;
            numerator.div(&denominator)
        },
    }
}

/// A symbol run multiplied left-to-right: coefficient 1, one bit per symbol.
fn symbol_product(symbols: &[Symbol]) -> Result<Canonical, EvalError> {
    let mut mask = 0u64;

    for symbol in symbols {
        let bit = resolve(symbol);
        if mask & bit != 0 {
            return Err(EvalError::RepeatedSymbolInProduct { symbols: bit });
        }
        mask |= bit;
    }

    Ok(Canonical::from_term(CanonTerm::symbol(mask)))
}

fn resolve(symbol: &Symbol) -> u64 {
    let mask = if symbol.greek {
        symbols::greek_mask(&symbol.name)
    } else {
        symbol.name.chars().next().and_then(symbols::latin_mask)
    };

    mask.expect("the tokenizer only emits pool symbols")
}
