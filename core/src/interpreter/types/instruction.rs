//! Decoded instructions and their operands

use super::token::Token;
use serde::{Deserialize, Serialize};
use std::fmt;

/* ===================== Labels ===================== */

/// Opaque jump-target identifier
///
/// The raw token run between a flow-control signature and its terminating
/// line break. Only ever compared for equality, never decoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Label(Vec<Token>);

impl Label {
    pub fn new(tokens: Vec<Token>) -> Self {
        Label(tokens)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "<empty>");
        }
        for token in &self.0 {
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}

impl From<Label> for String {
    fn from(label: Label) -> Self {
        label.0.iter().map(|t| t.symbol()).collect()
    }
}

impl TryFrom<String> for Label {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.chars()
            .map(|c| match c {
                'S' => Ok(Token::SpaceMark),
                'T' => Ok(Token::TabMark),
                'E' => Ok(Token::ExtraMark),
                other => Err(format!("invalid label token '{}'", other)),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Label)
    }
}

/* ===================== Instructions ===================== */

/// Arithmetic operator chosen by the sub-selector after the arithmetic group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl ArithOp {
    pub fn mnemonic(self) -> &'static str {
        match self {
            ArithOp::Add => "add",
            ArithOp::Sub => "sub",
            ArithOp::Mul => "mul",
            ArithOp::Div => "div",
            ArithOp::Mod => "mod",
        }
    }
}

/// One fully decoded instruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Instruction {
    Push { value: i64 },
    Duplicate,
    Swap,
    Discard,
    Arithmetic {
        #[serde(rename = "operator")]
        op: ArithOp,
    },
    Store,
    Load,
    #[serde(rename = "label")]
    Mark { label: Label },
    Call { label: Label },
    Jump { label: Label },
    JumpIfZero { label: Label },
    JumpIfNegative { label: Label },
    Return,
    End,
    OutputChar,
    OutputNumber,
    InputChar,
    InputNumber,
    DebugPrint,
}

impl Instruction {
    /// Short name used in traces and listings
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Instruction::Push { .. } => "push",
            Instruction::Duplicate => "dup",
            Instruction::Swap => "swap",
            Instruction::Discard => "discard",
            Instruction::Arithmetic { op } => op.mnemonic(),
            Instruction::Store => "store",
            Instruction::Load => "load",
            Instruction::Mark { .. } => "label",
            Instruction::Call { .. } => "call",
            Instruction::Jump { .. } => "jump",
            Instruction::JumpIfZero { .. } => "jz",
            Instruction::JumpIfNegative { .. } => "jn",
            Instruction::Return => "ret",
            Instruction::End => "end",
            Instruction::OutputChar => "putc",
            Instruction::OutputNumber => "putn",
            Instruction::InputChar => "getc",
            Instruction::InputNumber => "getn",
            Instruction::DebugPrint => "debug",
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Push { value } => write!(f, "push {}", value),
            Instruction::Mark { label }
            | Instruction::Call { label }
            | Instruction::Jump { label }
            | Instruction::JumpIfZero { label }
            | Instruction::JumpIfNegative { label } => {
                write!(f, "{} {}", self.mnemonic(), label)
            }
            _ => write!(f, "{}", self.mnemonic()),
        }
    }
}
