//! A finite-state tokenizer for the restricted LaTeX input language.

use crate::symbols;
use smol_str::SmolStr;
use std::fmt::{self, Display, Formatter};

/// Turn a character stream into the full token sequence, terminated by an
/// [`TokenClass::EndOfStream`] token.
pub fn tokenize(src: &str) -> Result<Vec<Token>, LexError> {
    Lexer::default().run(src)
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TokenClass {
    /// `a`..`z` or a Greek name from the pool.
    Symbol,
    Number,
    /// `frac`.
    Keyword,
    /// `+ - * /`.
    Operator,
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    EndOfStream,
}

impl Display for TokenClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenClass::Symbol => "Symbol",
            TokenClass::Number => "Number",
            TokenClass::Keyword => "Keyword",
            TokenClass::Operator => "Operator",
            TokenClass::LeftParen => "Left Parenthesis",
            TokenClass::RightParen => "Right Parenthesis",
            TokenClass::LeftBrace => "Left Brace",
            TokenClass::RightBrace => "Right Brace",
            TokenClass::EndOfStream => "End Of Stream",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub class: TokenClass,
    pub lexeme: SmolStr,
}

impl Token {
    fn new(class: TokenClass, lexeme: impl Into<SmolStr>) -> Self {
        Token {
            class,
            lexeme: lexeme.into(),
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}>", self.class, self.lexeme)
    }
}

/// Possible errors that may occur while tokenizing.
#[derive(Debug, Clone, PartialEq)]
pub enum LexError {
    EmptyString,
    IllegalChar {
        character: char,
        position: usize,
    },
    DigitAfterLetter {
        position: usize,
    },
    IllegalCharAfterEscape {
        character: char,
        position: usize,
    },
    /// Every unrecognized name found in the scan, with its start position.
    BadSymbol {
        symbols: Vec<(SmolStr, usize)>,
    },
}

impl Display for LexError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LexError::EmptyString => write!(f, "empty input"),
            LexError::IllegalChar {
                character,
                position,
            } => write!(
                f,
                "illegal character '{}' at position {}",
                character, position
            ),
            LexError::DigitAfterLetter { position } => {
                write!(f, "digit after letter at position {}", position)
            },
            LexError::IllegalCharAfterEscape {
                character,
                position,
            } => write!(
                f,
                "illegal character '{}' after '\\' at position {}",
                character, position
            ),
            LexError::BadSymbol { symbols } => {
                write!(f, "bad symbols:")?;
                for (name, position) in symbols {
                    write!(f, " \\{} (position {})", name, position)?;
                }
                Ok(())
            },
        }
    }
}

impl std::error::Error for LexError {}

#[derive(Debug, Copy, Clone, PartialEq)]
enum State {
    Init,
    Number,
    Letter,
    Escape,
    Symbol,
}

#[derive(Debug, Copy, Clone, PartialEq)]
enum CharClass {
    Digit,
    Letter,
    Escape,
    WhiteSpace,
    Operator,
    Bracket,
    Illegal,
}

fn classify(c: char) -> CharClass {
    match c {
        '0'..='9' => CharClass::Digit,
        'a'..='z' => CharClass::Letter,
        '\\' => CharClass::Escape,
        ' ' | '\t' | '\n' | '\r' | '\0' => CharClass::WhiteSpace,
        '+' | '-' | '*' | '/' => CharClass::Operator,
        '(' | ')' | '{' | '}' => CharClass::Bracket,
        _ => CharClass::Illegal,
    }
}

#[derive(Debug, Default)]
struct Lexer {
    tokens: Vec<Token>,
    /// Characters of the number or escaped name currently being read.
    buffer: String,
    bad_symbols: Vec<(SmolStr, usize)>,
}

impl Lexer {
    fn run(mut self, src: &str) -> Result<Vec<Token>, LexError> {
        let mut state = State::Init;

        for (position, c) in src.char_indices() {
            state = self.step(state, c, position)?;
        }

        // missing trailing whitespace acts as an implicit terminator
        match state {
            State::Number => self.push_number(),
            State::Symbol => self.push_name(src.len()),
            _ => {},
        }

        if !self.bad_symbols.is_empty() {
            return Err(LexError::BadSymbol {
                symbols: self.bad_symbols,
            });
        }

        if self.tokens.is_empty() {
            return Err(LexError::EmptyString);
        }

        self.tokens
            .push(Token::new(TokenClass::EndOfStream, "$"));
        Ok(self.tokens)
    }

    fn step(
        &mut self,
        state: State,
        c: char,
        position: usize,
    ) -> Result<State, LexError> {
        let class = classify(c);

        if class == CharClass::Illegal {
            return Err(LexError::IllegalChar {
                character: c,
                position,
            });
        }

        match (state, class) {
            (State::Init, CharClass::Digit) => {
                self.buffer.push(c);
                Ok(State::Number)
            },
            (State::Init, CharClass::Letter) => {
                self.push_single(c);
                Ok(State::Letter)
            },
            (State::Init, CharClass::Escape) => Ok(State::Escape),
            (State::Init, CharClass::WhiteSpace) => Ok(State::Init),
            (State::Init, CharClass::Operator)
            | (State::Init, CharClass::Bracket) => {
                self.push_single(c);
                Ok(State::Init)
            },

            (State::Number, CharClass::Digit) => {
                self.buffer.push(c);
                Ok(State::Number)
            },
            (State::Number, CharClass::Letter) => {
                self.push_number();
                self.push_single(c);
                Ok(State::Letter)
            },
            (State::Number, CharClass::Escape) => {
                self.push_number();
                Ok(State::Escape)
            },
            (State::Number, CharClass::WhiteSpace) => {
                self.push_number();
                Ok(State::Init)
            },
            (State::Number, CharClass::Operator)
            | (State::Number, CharClass::Bracket) => {
                self.push_number();
                self.push_single(c);
                Ok(State::Init)
            },

            // bare letters never combine into identifiers, so each Letter
            // character was already emitted on entry
            (State::Letter, CharClass::Digit) => {
                Err(LexError::DigitAfterLetter { position })
            },
            (State::Letter, CharClass::Letter) => {
                self.push_single(c);
                Ok(State::Letter)
            },
            (State::Letter, CharClass::Escape) => Ok(State::Escape),
            (State::Letter, CharClass::WhiteSpace) => Ok(State::Init),
            (State::Letter, CharClass::Operator)
            | (State::Letter, CharClass::Bracket) => {
                self.push_single(c);
                Ok(State::Init)
            },

            (State::Escape, CharClass::Letter) => {
                self.buffer.push(c);
                Ok(State::Symbol)
            },
            (State::Escape, _) => Err(LexError::IllegalCharAfterEscape {
                character: c,
                position,
            }),

            (State::Symbol, CharClass::Digit) => {
                Err(LexError::DigitAfterLetter { position })
            },
            (State::Symbol, CharClass::Letter) => {
                self.buffer.push(c);
                Ok(State::Symbol)
            },
            (State::Symbol, CharClass::Escape) => {
                self.push_name(position);
                Ok(State::Escape)
            },
            (State::Symbol, CharClass::WhiteSpace) => {
                self.push_name(position);
                Ok(State::Init)
            },
            (State::Symbol, CharClass::Operator)
            | (State::Symbol, CharClass::Bracket) => {
                self.push_name(position);
                self.push_single(c);
                Ok(State::Init)
            },

            (_, CharClass::Illegal) => unreachable!(),
        }
    }

    /// Emit a token for a character that is a complete lexeme on its own.
    fn push_single(&mut self, c: char) {
        let class = match c {
            'a'..='z' => TokenClass::Symbol,
            '+' | '-' | '*' | '/' => TokenClass::Operator,
            '(' => TokenClass::LeftParen,
            ')' => TokenClass::RightParen,
            '{' => TokenClass::LeftBrace,
            '}' => TokenClass::RightBrace,
            other => unreachable!("'{}' never forms a token by itself", other),
        };

        let mut lexeme = String::new();
        lexeme.push(c);
        self.tokens.push(Token::new(class, lexeme));
    }

    fn push_number(&mut self) {
        let lexeme = std::mem::replace(&mut self.buffer, String::new());
        self.tokens.push(Token::new(TokenClass::Number, lexeme));
    }

    /// Classify a finished escape run against the keyword and Greek pools.
    /// Unknown names are recorded and scanning continues, so one report can
    /// list them all.
    fn push_name(&mut self, end: usize) {
        let name = std::mem::replace(&mut self.buffer, String::new());

        if name == symbols::KEYWORD_FRAC {
            self.tokens.push(Token::new(TokenClass::Keyword, name));
        } else if symbols::is_greek(&name) {
            self.tokens.push(Token::new(TokenClass::Symbol, name));
        } else {
            let start = end - name.len();
            self.bad_symbols.push((name.into(), start));
        }
    }
}
