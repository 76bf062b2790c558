//! Type definitions for the interpreter
//!
//! - Tokens and the token stream (Token, Program)
//! - Decoded instructions (Instruction, ArithOp, Label)
//! - Runtime values (Value)

pub mod instruction;
pub mod token;
pub mod values;

pub use instruction::{ArithOp, Instruction, Label};
pub use token::{Program, Token};
pub use values::Value;
