//! Marker tokens and the token stream they form

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four marker tokens the lexer emits
///
/// Written in listings as `S`, `T`, `L` and `E`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Token {
    /// `便利`
    SpaceMark,
    /// `感極まってきました`
    TabMark,
    /// A literal line break
    LineMark,
    /// `かなり`
    ExtraMark,
}

impl Token {
    /// Single-letter notation used in listings and label names
    pub fn symbol(self) -> char {
        match self {
            Token::SpaceMark => 'S',
            Token::TabMark => 'T',
            Token::LineMark => 'L',
            Token::ExtraMark => 'E',
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/* ===================== Program ===================== */

/// The ordered token stream of one run
///
/// Immutable once the lexer has produced it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    tokens: Vec<Token>,
}

impl Program {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn get(&self, pc: usize) -> Option<Token> {
        self.tokens.get(pc).copied()
    }

    /// True when the only thing left at `pc` is one trailing line break
    ///
    /// Both passes accept this as a clean end of program.
    pub fn is_trailing_padding(&self, pc: usize) -> bool {
        pc + 1 == self.tokens.len() && self.tokens[pc] == Token::LineMark
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}

impl From<Vec<Token>> for Program {
    fn from(tokens: Vec<Token>) -> Self {
        Program::new(tokens)
    }
}
