//! An `LL(1)` recursive descent parser over the token sequence.
//!
//! Every nonterminal has one parse function which dispatches on the current
//! token's class (plus its lexeme for operators) with no backtracking. The
//! first syntax error aborts the parse.

use crate::{
    ast::{AddOp, Expr, Fact, Frac, MulOp, Num, Symbol, Term, UExpr},
    lexer::{Token, TokenClass},
};
use smol_str::SmolStr;
use std::fmt::{self, Display, Formatter};

/// Parse a token sequence (as produced by [`crate::lexer::tokenize`]) into
/// a syntax tree.
pub fn parse(tokens: &[Token]) -> Result<Expr, ParseError> {
    Parser::new(tokens).parse()
}

/// Possible errors that may occur while parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The token at `index` matches no expected first set.
    UnexpectedToken { lexeme: SmolStr, index: usize },
    /// A numeric literal too large for a machine integer.
    NumberTooLarge { lexeme: SmolStr, index: usize },
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnexpectedToken { lexeme, index } => {
                write!(f, "unexpected token \"{}\" at token {}", lexeme, index)
            },
            ParseError::NumberTooLarge { lexeme, index } => {
                write!(f, "number \"{}\" at token {} is too large", lexeme, index)
            },
        }
    }
}

impl std::error::Error for ParseError {}

#[derive(Debug, Clone)]
struct Parser<'a> {
    tokens: &'a [Token],
    cursor: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        assert!(
            matches!(
                tokens.last(),
                Some(token) if token.class == TokenClass::EndOfStream
            ),
            "the token stream must be terminated"
        );

        Parser { tokens, cursor: 0 }
    }

    fn parse(mut self) -> Result<Expr, ParseError> {
        let expr = self.expr()?;

        // a successful parse stops *on* the end-of-stream token
        if self.current().class == TokenClass::EndOfStream {
            Ok(expr)
        } else {
            Err(self.unexpected())
        }
    }

    fn current(&self) -> &'a Token { &self.tokens[self.cursor] }

    fn bump(&mut self) -> &'a Token {
        let token = &self.tokens[self.cursor];
        // never advance past the end-of-stream token
        if token.class != TokenClass::EndOfStream {
            self.cursor += 1;
        }
        token
    }

    fn expect(&mut self, class: TokenClass) -> Result<&'a Token, ParseError> {
        if self.current().class == class {
            Ok(self.bump())
        } else {
            Err(self.unexpected())
        }
    }

    fn unexpected(&self) -> ParseError {
        ParseError::UnexpectedToken {
            lexeme: self.current().lexeme.clone(),
            index: self.cursor,
        }
    }

    /// The additive operator under the cursor, if any.
    fn add_op(&self) -> Option<AddOp> {
        if self.current().class != TokenClass::Operator {
            return None;
        }
        match self.current().lexeme.as_str() {
            "+" => Some(AddOp::Plus),
            "-" => Some(AddOp::Minus),
            _ => None,
        }
    }

    fn mul_op(&self) -> Option<MulOp> {
        if self.current().class != TokenClass::Operator {
            return None;
        }
        match self.current().lexeme.as_str() {
            "*" => Some(MulOp::Times),
            "/" => Some(MulOp::Divide),
            _ => None,
        }
    }

    /// `Expr -> Term Exprs`, `Exprs -> ("+"|"-") Term Exprs | ε`
    fn expr(&mut self) -> Result<Expr, ParseError> {
        let first = self.term()?;
        let mut rest = Vec::new();

        loop {
            if let Some(op) = self.add_op() {
                self.bump();
                rest.push((op, self.term()?));
                continue;
            }

            match self.current().class {
                TokenClass::RightParen
                | TokenClass::RightBrace
                | TokenClass::EndOfStream => break,
                _ => return Err(self.unexpected()),
            }
        }

        Ok(Expr { first, rest })
    }

    /// `Term -> UExpr Terms`, `Terms -> ("*"|"/") UExpr Terms | ε`
    fn term(&mut self) -> Result<Term, ParseError> {
        let first = self.uexpr()?;
        let mut rest = Vec::new();

        loop {
            if let Some(op) = self.mul_op() {
                self.bump();
                rest.push((op, self.uexpr()?));
                continue;
            }

            // Terms also reduces to ε in front of an additive operator
            if self.add_op().is_some() {
                break;
            }

            match self.current().class {
                TokenClass::RightParen
                | TokenClass::RightBrace
                | TokenClass::EndOfStream => break,
                _ => return Err(self.unexpected()),
            }
        }

        Ok(Term { first, rest })
    }

    /// `UExpr -> ("+"|"-") Fact | Fact`
    fn uexpr(&mut self) -> Result<UExpr, ParseError> {
        let sign = self.add_op();
        if sign.is_some() {
            self.bump();
        }

        Ok(UExpr {
            sign,
            fact: self.fact()?,
        })
    }

    /// `Fact -> "(" Expr ")" | Num Symb0 | Symbs`
    fn fact(&mut self) -> Result<Fact, ParseError> {
        match self.current().class {
            TokenClass::LeftParen => {
                self.bump();
                let inner = self.expr()?;
                self.expect(TokenClass::RightParen)?;
                Ok(Fact::Grouped(Box::new(inner)))
            },
            TokenClass::Number | TokenClass::Keyword => {
                let num = self.num()?;
                let symbols = self.symb0();
                Ok(Fact::Number { num, symbols })
            },
            TokenClass::Symbol => Ok(Fact::Symbols(self.symbs()?)),
            _ => Err(self.unexpected()),
        }
    }

    /// `Num -> Frac | Number`
    fn num(&mut self) -> Result<Num, ParseError> {
        match self.current().class {
            TokenClass::Keyword => Ok(Num::Frac(Box::new(self.frac()?))),
            TokenClass::Number => {
                let index = self.cursor;
                let token = self.bump();
                let value = token.lexeme.parse().map_err(|_| {
                    ParseError::NumberTooLarge {
                        lexeme: token.lexeme.clone(),
                        index,
                    }
                })?;
                Ok(Num::Literal(value))
            },
            _ => Err(self.unexpected()),
        }
    }

    /// `Frac -> "frac" "{" Expr "}" "{" Expr "}"`
    fn frac(&mut self) -> Result<Frac, ParseError> {
        self.expect(TokenClass::Keyword)?;

        self.expect(TokenClass::LeftBrace)?;
        let numerator = self.expr()?;
        self.expect(TokenClass::RightBrace)?;

        self.expect(TokenClass::LeftBrace)?;
        let denominator = self.expr()?;
        self.expect(TokenClass::RightBrace)?;

        Ok(Frac {
            numerator,
            denominator,
        })
    }

    /// `Symbs -> symbol Symb0` — at least one symbol.
    fn symbs(&mut self) -> Result<Vec<Symbol>, ParseError> {
        if self.current().class != TokenClass::Symbol {
            return Err(self.unexpected());
        }
        Ok(self.symb0())
    }

    /// `Symb0 -> Symbs | ε` — possibly empty symbol run.
    fn symb0(&mut self) -> Vec<Symbol> {
        let mut symbols = Vec::new();
        while self.current().class == TokenClass::Symbol {
            symbols.push(self.symbol());
        }
        symbols
    }

    fn symbol(&mut self) -> Symbol {
        let token = self.bump();
        debug_assert_eq!(token.class, TokenClass::Symbol);

        // bare letters are single characters; pool names are longer
        Symbol {
            name: token.lexeme.clone(),
            greek: token.lexeme.len() > 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn parse_src(src: &str) -> Result<Expr, ParseError> {
        parse(&tokenize(src).unwrap())
    }

    macro_rules! parses {
        ($name:ident, $src:expr) => {
            #[test]
            fn $name() {
                parse_src($src).unwrap();
            }
        };
    }

    macro_rules! rejects {
        ($name:ident, $src:expr, $lexeme:expr, $index:expr) => {
            #[test]
            fn $name() {
                assert_eq!(
                    parse_src($src),
                    Err(ParseError::UnexpectedToken {
                        lexeme: $lexeme.into(),
                        index: $index,
                    })
                );
            }
        };
    }

    parses!(single_number, "1");
    parses!(sums_and_differences, "1 + 2 - 3");
    parses!(products_and_quotients, "1 * 2 / 3");
    parses!(unary_signs, "-a + +b");
    parses!(unary_after_times, "a * -b");
    parses!(grouping, "(1 + a) * 2");
    parses!(fraction, "\\frac{1}{11}");
    parses!(nested_fraction, "\\frac{\\frac{1}{2}}{3}");
    parses!(number_with_symbols, "2ab\\alpha");
    parses!(bare_symbol_run, "ab\\pi");
    parses!(documented_example, "\\frac{1}{11}\\beta + 2\\beta  - \\frac{a}{\\pi}ab / cd\\alpha");

    rejects!(trailing_operator, "a +", "$", 2);
    rejects!(double_star, "a * * b", "*", 2);
    rejects!(lone_close_paren, ")", ")", 0);
    rejects!(unbalanced_group, "(a", "$", 2);
    rejects!(empty_group, "()", ")", 1);
    rejects!(adjacent_numbers, "2 2", "2", 1);
    rejects!(frac_missing_brace, "\\frac 1 {2}", "1", 1);
    rejects!(paren_after_number, "2(a)", "(", 1);

    #[test]
    fn structure_of_a_sum() {
        let expr = parse_src("2a + 1").unwrap();

        assert_eq!(expr.rest.len(), 1);
        assert_eq!(expr.rest[0].0, AddOp::Plus);
        match &expr.first.first.fact {
            Fact::Number { num, symbols } => {
                assert_eq!(*num, Num::Literal(2));
                assert_eq!(symbols.len(), 1);
                assert_eq!(symbols[0].name, "a");
                assert!(!symbols[0].greek);
            },
            other => panic!("expected a number fact, got {:?}", other),
        }
    }

    #[test]
    fn unary_minus_is_recorded() {
        let expr = parse_src("-\\pi").unwrap();
        let uexpr = &expr.first.first;

        assert_eq!(uexpr.sign, Some(AddOp::Minus));
        match &uexpr.fact {
            Fact::Symbols(symbols) => {
                assert_eq!(symbols[0].name, "pi");
                assert!(symbols[0].greek);
            },
            other => panic!("expected a symbol fact, got {:?}", other),
        }
    }

    #[test]
    fn division_operator_is_recorded() {
        let expr = parse_src("a / b").unwrap();
        assert_eq!(expr.first.rest.len(), 1);
        assert_eq!(expr.first.rest[0].0, MulOp::Divide);
    }

    #[test]
    fn oversized_literal_is_rejected() {
        assert_eq!(
            parse_src("99999999999999999999"),
            Err(ParseError::NumberTooLarge {
                lexeme: "99999999999999999999".into(),
                index: 0,
            })
        );
    }
}
