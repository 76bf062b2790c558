//! Lexer - pest grammar turning source text into marker tokens
//!
//! Only three keywords and the line break carry meaning; every other character
//! is commentary and dropped.

use pest::Parser;
use pest_derive::Parser;

use super::errors::LexError;
use super::types::{Program, Token};


/* ===================== PEST Parser ===================== */

#[derive(Parser)]
#[grammar = "interpreter/lexer/ujihisa.pest"]
struct MarkerLexer;

impl From<pest::error::Error<Rule>> for LexError {
    fn from(err: pest::error::Error<Rule>) -> Self {
        LexError(err.to_string())
    }
}

/// Source spelling of each marker token
pub const SPACE_KEYWORD: &str = "便利";
pub const TAB_KEYWORD: &str = "感極まってきました";
pub const EXTRA_KEYWORD: &str = "かなり";

/* ===================== Public API ===================== */

/// Tokenize source text into a program
///
/// Never fails on well-formed UTF-8; the error path only exists because the
/// pest backend is fallible.
pub fn tokenize(source: &str) -> Result<Program, LexError> {
    let mut pairs = MarkerLexer::parse(Rule::program, source)?;

    let Some(program) = pairs.next() else {
        return Ok(Program::default());
    };

    let tokens: Vec<Token> = program
        .into_inner()
        .filter_map(|pair| match pair.as_rule() {
            Rule::space_mark => Some(Token::SpaceMark),
            Rule::tab_mark => Some(Token::TabMark),
            Rule::extra_mark => Some(Token::ExtraMark),
            Rule::line_mark => Some(Token::LineMark),
            _ => None,
        })
        .collect();

    tracing::debug!(tokens = tokens.len(), source_len = source.len(), "source tokenized");

    Ok(Program::new(tokens))
}

/// Render a program back into source text
///
/// Inverse of [`tokenize`] up to dropped commentary.
pub fn render(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| match t {
            Token::SpaceMark => SPACE_KEYWORD,
            Token::TabMark => TAB_KEYWORD,
            Token::ExtraMark => EXTRA_KEYWORD,
            Token::LineMark => "\n",
        })
        .collect()
}
