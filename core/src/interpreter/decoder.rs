//! Opcode decoder
//!
//! Decoding and skipping are the same operation: operands are only delimited by
//! a terminating line break, so the span of an instruction is known only after
//! it has been decoded. Both the label pass and the execution pass call
//! [`decode`] with identical results.
//!
//! ## Dispatch
//! 1. The primary table is tried top to bottom; the first signature whose
//!    fixed prefix matches wins. Order matters because some signatures are
//!    prefixes of others.
//! 2. The arithmetic group only selects a family. A second table of
//!    sub-selectors then picks the operator. A group prefix with no valid
//!    sub-selector is a mismatch and consumes nothing.

use super::errors::{InterpretError, InterpretResult};
use super::types::Token::{self, ExtraMark as E, LineMark as L, SpaceMark as S, TabMark as T};
use super::types::{ArithOp, Instruction, Label, Program};

/* ===================== Signatures ===================== */

/// What follows a signature's fixed prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandKind {
    None,
    /// Sign token, binary digits, line break
    Number,
    /// Raw tokens up to a line break
    Label,
}

/// Fixed token prefix plus an optional trailing operand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    pub pattern: &'static [Token],
    pub operand: OperandKind,
}

impl Signature {
    pub const fn plain(pattern: &'static [Token]) -> Self {
        Self {
            pattern,
            operand: OperandKind::None,
        }
    }

    pub const fn number(pattern: &'static [Token]) -> Self {
        Self {
            pattern,
            operand: OperandKind::Number,
        }
    }

    pub const fn label(pattern: &'static [Token]) -> Self {
        Self {
            pattern,
            operand: OperandKind::Label,
        }
    }
}

/// Operand consumed by a successful match
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    None,
    Number(i64),
    Label(Label),
}

/* ===================== Opcode Tables ===================== */

/// How a matched primary signature becomes an instruction
enum Family {
    Plain(Instruction),
    Number(fn(i64) -> Instruction),
    Label(fn(Label) -> Instruction),
    Arithmetic,
}

struct Opcode {
    signature: Signature,
    family: Family,
}

const fn opcode(signature: Signature, family: Family) -> Opcode {
    Opcode { signature, family }
}

fn push(value: i64) -> Instruction {
    Instruction::Push { value }
}

fn mark(label: Label) -> Instruction {
    Instruction::Mark { label }
}

fn call(label: Label) -> Instruction {
    Instruction::Call { label }
}

fn jump(label: Label) -> Instruction {
    Instruction::Jump { label }
}

fn jump_if_zero(label: Label) -> Instruction {
    Instruction::JumpIfZero { label }
}

fn jump_if_negative(label: Label) -> Instruction {
    Instruction::JumpIfNegative { label }
}

/// Primary table, in decode priority order
static PRIMARY: [Opcode; 19] = [
    // Stack
    opcode(Signature::number(&[S, S]), Family::Number(push)),
    opcode(Signature::plain(&[S, L, S]), Family::Plain(Instruction::Duplicate)),
    opcode(Signature::plain(&[S, L, T]), Family::Plain(Instruction::Swap)),
    opcode(Signature::plain(&[S, L, L]), Family::Plain(Instruction::Discard)),
    // Arithmetic group
    opcode(Signature::plain(&[T, S]), Family::Arithmetic),
    // Heap
    opcode(Signature::plain(&[T, T, S]), Family::Plain(Instruction::Store)),
    opcode(Signature::plain(&[T, T, T]), Family::Plain(Instruction::Load)),
    // Flow control
    opcode(Signature::label(&[L, S, S]), Family::Label(mark)),
    opcode(Signature::label(&[L, S, T]), Family::Label(call)),
    opcode(Signature::label(&[L, S, L]), Family::Label(jump)),
    opcode(Signature::label(&[L, T, S]), Family::Label(jump_if_zero)),
    opcode(Signature::label(&[L, T, T]), Family::Label(jump_if_negative)),
    opcode(Signature::plain(&[L, T, L]), Family::Plain(Instruction::Return)),
    opcode(Signature::plain(&[L, L, L]), Family::Plain(Instruction::End)),
    // I/O
    opcode(Signature::plain(&[T, L, S, S]), Family::Plain(Instruction::OutputChar)),
    opcode(Signature::plain(&[T, L, S, T]), Family::Plain(Instruction::OutputNumber)),
    opcode(Signature::plain(&[T, L, T, S]), Family::Plain(Instruction::InputChar)),
    opcode(Signature::plain(&[T, L, T, T]), Family::Plain(Instruction::InputNumber)),
    // Debug
    opcode(Signature::plain(&[E]), Family::Plain(Instruction::DebugPrint)),
];

/// Sub-selectors tried once the arithmetic group has matched
static ARITHMETIC: [(Signature, ArithOp); 5] = [
    (Signature::plain(&[S, S]), ArithOp::Add),
    (Signature::plain(&[S, T]), ArithOp::Sub),
    (Signature::plain(&[S, L]), ArithOp::Mul),
    (Signature::plain(&[T, S]), ArithOp::Div),
    (Signature::plain(&[T, T]), ArithOp::Mod),
];

/* ===================== Matching ===================== */

/// Try to match one signature at `pc`
///
/// On success returns the cursor just past the prefix and its operand. On a
/// mismatch returns `Ok(None)`; the caller's cursor is never touched either way.
/// A prefix or operand that runs off the end of the program is a mismatch.
pub fn try_match(
    program: &Program,
    pc: usize,
    signature: &Signature,
) -> InterpretResult<Option<(usize, Operand)>> {
    let tokens = program.tokens();
    let end = pc + signature.pattern.len();
    if tokens.get(pc..end) != Some(signature.pattern) {
        return Ok(None);
    }

    match signature.operand {
        OperandKind::None => Ok(Some((end, Operand::None))),
        OperandKind::Number => Ok(read_number(tokens, end, pc)?
            .map(|(value, next)| (next, Operand::Number(value)))),
        OperandKind::Label => {
            Ok(read_label(tokens, end).map(|(label, next)| (next, Operand::Label(label))))
        }
    }
}

/// Read `sign digits* LineMark` starting at `pc`
///
/// `start` is the instruction's own position, used for overflow reports.
fn read_number(tokens: &[Token], pc: usize, start: usize) -> InterpretResult<Option<(i64, usize)>> {
    let Some(&sign) = tokens.get(pc) else {
        return Ok(None);
    };

    // Unsigned so that the magnitude of i64::MIN still fits
    let mut magnitude: u64 = 0;
    let mut cursor = pc + 1;
    loop {
        let Some(&token) = tokens.get(cursor) else {
            return Ok(None);
        };
        cursor += 1;

        if token == L {
            break;
        }

        let bit = u64::from(token == T);
        magnitude = magnitude
            .checked_mul(2)
            .and_then(|m| m.checked_add(bit))
            .ok_or(InterpretError::NumberOverflow { position: start })?;
    }

    let value = if sign == S {
        i64::try_from(magnitude).ok()
    } else {
        0i64.checked_sub_unsigned(magnitude)
    };
    value
        .map(|value| Some((value, cursor)))
        .ok_or(InterpretError::NumberOverflow { position: start })
}

/// Read raw tokens up to (and consuming) the next line break
fn read_label(tokens: &[Token], pc: usize) -> Option<(Label, usize)> {
    let rest = tokens.get(pc..)?;
    let len = rest.iter().position(|&t| t == L)?;
    Some((Label::new(rest[..len].to_vec()), pc + len + 1))
}

/* ===================== Decoding ===================== */

/// Decode the instruction starting at `pc`
///
/// Returns the instruction and the cursor just past its full span, or
/// `Ok(None)` if nothing in the tables matches.
pub fn decode(program: &Program, pc: usize) -> InterpretResult<Option<(Instruction, usize)>> {
    for opcode in &PRIMARY {
        let Some((next, operand)) = try_match(program, pc, &opcode.signature)? else {
            continue;
        };

        let decoded = match (&opcode.family, operand) {
            (Family::Plain(instruction), _) => (instruction.clone(), next),
            (Family::Number(build), Operand::Number(value)) => (build(value), next),
            (Family::Label(build), Operand::Label(label)) => (build(label), next),
            (Family::Arithmetic, _) => return decode_arithmetic(program, next),
            // The operand kind is fixed by the signature, so no other pairing occurs
            _ => continue,
        };
        return Ok(Some(decoded));
    }

    Ok(None)
}

/// Pick the arithmetic operator following the group prefix
fn decode_arithmetic(program: &Program, pc: usize) -> InterpretResult<Option<(Instruction, usize)>> {
    for (signature, op) in &ARITHMETIC {
        if let Some((next, _)) = try_match(program, pc, signature)? {
            return Ok(Some((Instruction::Arithmetic { op: *op }, next)));
        }
    }
    Ok(None)
}

/// Encode an integer as a push-number operand
///
/// Sign token, then the magnitude in binary (most significant first), then a
/// line break. Zero is encoded with no digits.
pub fn encode_number(value: i64) -> Vec<Token> {
    let mut tokens = vec![if value < 0 { T } else { S }];
    let magnitude = value.unsigned_abs();
    if magnitude != 0 {
        let width = u64::BITS - magnitude.leading_zeros();
        for bit in (0..width).rev() {
            tokens.push(if magnitude >> bit & 1 == 1 { T } else { S });
        }
    }
    tokens.push(L);
    tokens
}
