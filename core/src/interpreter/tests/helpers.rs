//! Test helpers for interpreter tests
//!
//! Programs are written in S/T/L/E notation (SpaceMark, TabMark, LineMark,
//! ExtraMark) and rendered to real keyword source before running. Whitespace
//! in the notation is ignored so instructions can be spaced out.

use std::io::Cursor;

use crate::interpreter::decoder::encode_number;
use crate::interpreter::lexer::render;
use crate::interpreter::types::Token;
use crate::interpreter::{run, run_until_done, InterpretResult, ReaderInput, VM};

pub const DUP: &str = "SLS";
pub const SWAP: &str = "SLT";
pub const DISCARD: &str = "SLL";
pub const ADD: &str = "TSSS";
pub const SUB: &str = "TSST";
pub const MUL: &str = "TSSL";
pub const DIV: &str = "TSTS";
pub const MOD: &str = "TSTT";
pub const STORE: &str = "TTS";
pub const LOAD: &str = "TTT";
pub const RET: &str = "LTL";
pub const END: &str = "LLL";
pub const PUTC: &str = "TLSS";
pub const PUTN: &str = "TLST";
pub const GETC: &str = "TLTS";
pub const GETN: &str = "TLTT";
pub const DEBUG: &str = "E";

/// Parse S/T/L/E notation into tokens
pub fn tokens(notation: &str) -> Vec<Token> {
    notation
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            'S' => Token::SpaceMark,
            'T' => Token::TabMark,
            'L' => Token::LineMark,
            'E' => Token::ExtraMark,
            other => panic!("unexpected notation character {:?}", other),
        })
        .collect()
}

/// Render notation into keyword source text
pub fn source(notation: &str) -> String {
    render(&tokens(notation))
}

/// Notation for a push-number instruction
pub fn push(n: i64) -> String {
    let operand: String = encode_number(n).iter().map(|t| t.symbol()).collect();
    format!("SS{}", operand)
}

pub fn mark(label: &str) -> String {
    format!("LSS{}L", label)
}

pub fn call(label: &str) -> String {
    format!("LST{}L", label)
}

pub fn jump(label: &str) -> String {
    format!("LSL{}L", label)
}

pub fn jz(label: &str) -> String {
    format!("LTS{}L", label)
}

pub fn jn(label: &str) -> String {
    format!("LTT{}L", label)
}

/// Run a program given as notation fragments; returns the result and output
pub fn run_program(parts: &[&str], input: &str) -> (InterpretResult<()>, String) {
    let notation = parts.concat();
    let mut input = ReaderInput::new(Cursor::new(input.as_bytes().to_vec()));
    let mut output = Vec::new();
    let result = run(&source(&notation), &mut input, &mut output);
    (result, String::from_utf8(output).expect("output is UTF-8"))
}

/// Build a VM for a program so tests can inspect state after the run
pub fn load_vm(parts: &[&str]) -> VM {
    VM::load(&source(&parts.concat())).expect("program loads")
}

/// Run a prepared VM to completion
pub fn run_vm(vm: &mut VM, input: &str) -> (InterpretResult<()>, String) {
    let mut input = ReaderInput::new(Cursor::new(input.as_bytes().to_vec()));
    let mut output = Vec::new();
    let result = run_until_done(vm, &mut input, &mut output);
    (result, String::from_utf8(output).expect("output is UTF-8"))
}
