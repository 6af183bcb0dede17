//! Renders a canonical expression back into LaTeX.

use crate::{
    canon::{Canonical, Term},
    rational::Rational,
    symbols,
};
use std::fmt::Write;

/// Serialize `value` deterministically.
///
/// Terms are sorted ascending by symbol mask with the symbol-free term last,
/// so semantically equal expressions always render to identical text. The
/// empty expression denotes zero.
pub fn render(value: &Canonical) -> String {
    let mut terms: Vec<Term> = value.terms().to_vec();
    terms.sort_by_key(|term| sort_key(term.symbols));

    if terms.is_empty() {
        return "0".to_string();
    }

    let mut out = String::new();
    for (position, term) in terms.iter().enumerate() {
        if position > 0 && !term.coefficient.is_negative() {
            out.push('+');
        }
        write_coefficient(term.coefficient, term.symbols != 0, &mut out);
        symbols::append_symbols(term.symbols, &mut out);
    }
    out
}

// real masks only use bits 0..=49, so u64::MAX is a safe sentinel that
// sends the constant term to the end
fn sort_key(mask: u64) -> u64 {
    if mask == 0 {
        u64::MAX
    } else {
        mask
    }
}

fn write_coefficient(coefficient: Rational, has_symbols: bool, out: &mut String) {
    if has_symbols {
        if coefficient == Rational::integer(1) {
            return;
        }
        if coefficient == Rational::integer(-1) {
            out.push('-');
            return;
        }
    }

    if coefficient.is_integer() {
        let _ = write!(out, "{}", coefficient.numerator());
    } else {
        if coefficient.is_negative() {
            out.push('-');
        }
        let _ = write!(
            out,
            "\\frac{{{}}}{{{}}}",
            coefficient.numerator().abs(),
            coefficient.denominator()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{eval::evaluate, lexer::tokenize, parser::parse};

    fn reduce(src: &str) -> String {
        let tokens = tokenize(src).unwrap();
        let value = evaluate(&parse(&tokens).unwrap()).unwrap();
        render(&value)
    }

    macro_rules! render_test {
        ($name:ident, $src:expr, $should_be:expr) => {
            #[test]
            fn $name() {
                assert_eq!(reduce($src), $should_be);
            }
        };
    }

    render_test!(zero, "a - a", "0");
    render_test!(plain_number, "2 + 3", "5");
    render_test!(negative_number, "2 - 3", "-1");
    render_test!(unit_coefficient_is_omitted, "a + a - a", "a");
    render_test!(negative_unit_coefficient_is_a_bare_sign, "a - a - a", "-a");
    render_test!(integer_coefficient, "a + a", "2a");
    render_test!(fraction_coefficient, "\\frac{1}{2}a", "\\frac{1}{2}a");
    render_test!(
        negative_fraction_sign_sits_outside,
        "-\\frac{1}{2}a",
        "-\\frac{1}{2}a"
    );
    render_test!(bare_fraction, "\\frac{3}{4}", "\\frac{3}{4}");
    render_test!(terms_sort_by_mask, "b + a", "a+b");
    render_test!(constant_term_renders_last, "1 + a", "a+1");
    render_test!(
        negative_terms_carry_their_own_sign,
        "a - b - 1",
        "a-b-1"
    );
    render_test!(latin_before_greek, "\\alpha a", "a\\alpha");
    render_test!(
        greek_names_keep_pool_order,
        "\\omega\\alpha b",
        "b\\alpha\\omega"
    );
    render_test!(
        mixed_expression,
        "\\frac{1}{11}\\beta + 2\\beta",
        "\\frac{23}{11}\\beta"
    );

    #[test]
    fn rendering_is_idempotent_after_one_round_trip() {
        let inputs = vec![
            "a - a",
            "2ab + \\frac{1}{2}c - 7",
            "\\frac{2}{4} + \\pi\\alpha",
            "-a + 3b - \\frac{5}{3}",
        ];

        for src in inputs {
            let once = reduce(src);
            assert_eq!(reduce(&once), once, "not a fixed point: {}", src);
        }
    }
}
