//! # Marker-token stack machine interpreter
//!
//! Source text goes through three stages:
//!
//! 1. **Lexer** - keywords and line breaks become marker tokens
//! 2. **Label pass** - the decoder walks the whole program and records where
//!    each label is defined
//! 3. **Execution** - the decoder walks again, this time running every
//!    instruction against the stack, heap and call stack
//!
//! The decoder is shared by both passes and has no side effects.
//!
//! ```
//! use std::io::Cursor;
//! use ujihisa_core::interpreter::{run, ReaderInput};
//!
//! // push 5, push 3, add, output-number
//! let source = "便利便利便利感極まってきました便利感極まってきました\n\
//!               便利便利便利感極まってきました感極まってきました\n\
//!               感極まってきました便利便利便利\
//!               感極まってきました\n便利感極まってきました";
//! let mut input = ReaderInput::new(Cursor::new(Vec::new()));
//! let mut output = Vec::new();
//! run(source, &mut input, &mut output).unwrap();
//! assert_eq!(output, b"8");
//! ```

pub mod decoder;
pub mod errors;
pub mod exec_loop;
pub mod instructions;
pub mod io;
pub mod lexer;
pub mod resolver;
pub mod types;
pub mod vm;

#[cfg(test)]
mod tests;

use std::io::Write;

// Re-export commonly used items
pub use decoder::{decode, try_match, Operand, OperandKind, Signature};
pub use errors::{InterpretError, InterpretResult, LexError};
pub use exec_loop::{run_until_done, step};
pub use io::{InputSource, ReaderInput};
pub use lexer::tokenize;
pub use resolver::{disassemble, resolve_labels, LabelTable, ListingEntry};
pub use types::{ArithOp, Instruction, Label, Program, Token, Value};
pub use vm::{Heap, Step, ValueStack, VM};

/// Lex, resolve and run a program to completion
///
/// Each call builds a fresh VM, so running the same source twice starts from
/// empty state both times.
pub fn run<I, W>(source: &str, input: &mut I, output: &mut W) -> InterpretResult<()>
where
    I: InputSource + ?Sized,
    W: Write + ?Sized,
{
    let mut vm = VM::load(source)?;
    run_until_done(&mut vm, input, output)
}
