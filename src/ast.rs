//! The syntax tree produced by the parser.
//!
//! One variant per grammar alternative; the right-recursive continuation
//! rules (`Exprs`, `Terms`, `Symb0`) are flattened into vectors of
//! `(operator, operand)` pairs, which keeps the left-to-right evaluation
//! order without sentinel "empty" nodes.

use smol_str::SmolStr;

/// `Expr -> Term (("+"|"-") Term)*`
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub first: Term,
    pub rest: Vec<(AddOp, Term)>,
}

/// `Term -> UExpr (("*"|"/") UExpr)*`
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    pub first: UExpr,
    pub rest: Vec<(MulOp, UExpr)>,
}

/// `UExpr -> ("+"|"-")? Fact`
#[derive(Debug, Clone, PartialEq)]
pub struct UExpr {
    pub sign: Option<AddOp>,
    pub fact: Fact,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Fact {
    /// `"(" Expr ")"`
    Grouped(Box<Expr>),
    /// `Num Symb0` — a number optionally followed by a symbol run.
    Number { num: Num, symbols: Vec<Symbol> },
    /// `Symbs` — a bare symbol run with an implicit coefficient of 1.
    Symbols(Vec<Symbol>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Num {
    Literal(i64),
    Frac(Box<Frac>),
}

/// `Frac -> "frac" "{" Expr "}" "{" Expr "}"`
#[derive(Debug, Clone, PartialEq)]
pub struct Frac {
    pub numerator: Expr,
    pub denominator: Expr,
}

/// A single symbol occurrence: a bare Latin letter or an escaped Greek name.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: SmolStr,
    pub greek: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AddOp {
    Plus,
    Minus,
}

impl AddOp {
    pub fn glyph(self) -> char {
        match self {
            AddOp::Plus => '+',
            AddOp::Minus => '-',
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MulOp {
    Times,
    Divide,
}

impl MulOp {
    pub fn glyph(self) -> char {
        match self {
            MulOp::Times => '*',
            MulOp::Divide => '/',
        }
    }
}

impl Expr {
    /// An indented tree listing for debugging front ends.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        dump_expr(self, 0, &mut out);
        out
    }
}

fn line(depth: usize, text: &str, out: &mut String) {
    for _ in 0..depth {
        out.push_str("  ");
    }
    out.push_str(text);
    out.push('\n');
}

fn dump_expr(expr: &Expr, depth: usize, out: &mut String) {
    line(depth, "Expr", out);
    dump_term(&expr.first, depth + 1, out);
    for (op, term) in &expr.rest {
        line(depth + 1, &op.glyph().to_string(), out);
        dump_term(term, depth + 1, out);
    }
}

fn dump_term(term: &Term, depth: usize, out: &mut String) {
    line(depth, "Term", out);
    dump_uexpr(&term.first, depth + 1, out);
    for (op, operand) in &term.rest {
        line(depth + 1, &op.glyph().to_string(), out);
        dump_uexpr(operand, depth + 1, out);
    }
}

fn dump_uexpr(uexpr: &UExpr, depth: usize, out: &mut String) {
    if let Some(sign) = uexpr.sign {
        line(depth, &format!("UExpr {}", sign.glyph()), out);
    } else {
        line(depth, "UExpr", out);
    }
    dump_fact(&uexpr.fact, depth + 1, out);
}

fn dump_fact(fact: &Fact, depth: usize, out: &mut String) {
    match fact {
        Fact::Grouped(inner) => {
            line(depth, "(", out);
            dump_expr(inner, depth + 1, out);
            line(depth, ")", out);
        },
        Fact::Number { num, symbols } => {
            dump_num(num, depth, out);
            for symbol in symbols {
                dump_symbol(symbol, depth, out);
            }
        },
        Fact::Symbols(symbols) => {
            for symbol in symbols {
                dump_symbol(symbol, depth, out);
            }
        },
    }
}

fn dump_num(num: &Num, depth: usize, out: &mut String) {
    match num {
        Num::Literal(value) => {
            line(depth, &format!("Number({})", value), out)
        },
        Num::Frac(frac) => {
            line(depth, "Frac", out);
            dump_expr(&frac.numerator, depth + 1, out);
            dump_expr(&frac.denominator, depth + 1, out);
        },
    }
}

fn dump_symbol(symbol: &Symbol, depth: usize, out: &mut String) {
    let text = if symbol.greek {
        format!("Symbol(\\{})", symbol.name)
    } else {
        format!("Symbol({})", symbol.name)
    };
    line(depth, &text, out);
}
