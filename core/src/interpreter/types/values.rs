//! Runtime value types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Runtime value held by stack and heap cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "t", content = "v")]
pub enum Value {
    /// Never written
    #[default]
    Unset,
    Integer(i64),
    Character(char),
}

impl Value {
    /// Coerce to an integer
    ///
    /// Characters become their code point, `Unset` becomes zero.
    pub fn as_integer(&self) -> i64 {
        match self {
            Value::Integer(n) => *n,
            Value::Character(c) => i64::from(u32::from(*c)),
            Value::Unset => 0,
        }
    }

    /// Coerce to a character for output
    ///
    /// Integers are reinterpreted as code points; anything that is not a valid
    /// scalar value becomes U+FFFD. `Unset` has no character.
    pub fn as_char(&self) -> Option<char> {
        match self {
            Value::Character(c) => Some(*c),
            Value::Integer(n) => Some(
                u32::try_from(*n)
                    .ok()
                    .and_then(char::from_u32)
                    .unwrap_or(char::REPLACEMENT_CHARACTER),
            ),
            Value::Unset => None,
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Character(c)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unset => write!(f, "unset"),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Character(c) => write!(f, "{:?}", c),
        }
    }
}
