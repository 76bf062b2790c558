//! Tests for heap access and program input

use super::helpers::*;
use crate::interpreter::types::Value;
use crate::interpreter::InterpretError;
use std::io::ErrorKind;

/* ===================== Heap ===================== */

#[test]
fn test_store_then_load() {
    let (result, output) = run_program(
        &[
            &push(4),
            &push(9),
            STORE,
            // unrelated work in between
            &push(1),
            &push(2),
            ADD,
            DISCARD,
            &push(5),
            &push(6),
            STORE,
            &push(4),
            LOAD,
            PUTN,
        ],
        "",
    );
    result.unwrap();
    assert_eq!(output, "9");
}

#[test]
fn test_store_overwrites() {
    let mut vm = load_vm(&[&push(4), &push(9), STORE, &push(4), &push(10), STORE]);
    let (result, _) = run_vm(&mut vm, "");
    result.unwrap();
    assert_eq!(vm.heap.load(4), Value::Integer(10));
    assert_eq!(vm.heap.len(), 1);
    assert!(vm.stack.is_empty());
}

#[test]
fn test_negative_addresses() {
    let (result, output) = run_program(
        &[&push(-3), &push(77), STORE, &push(-3), LOAD, PUTN],
        "",
    );
    result.unwrap();
    assert_eq!(output, "77");
}

#[test]
fn test_load_unset_cell() {
    let mut vm = load_vm(&[&push(12), LOAD]);
    let (result, _) = run_vm(&mut vm, "");
    result.unwrap();
    assert_eq!(vm.stack.as_slice(), &[Value::Unset]);
}

#[test]
fn test_unset_outputs() {
    // putn of an unset cell prints 0, putc prints nothing
    let (result, output) = run_program(&[&push(12), LOAD, PUTN, &push(12), LOAD, PUTC], "");
    result.unwrap();
    assert_eq!(output, "0");
}

/* ===================== Input ===================== */

#[test]
fn test_input_char_echo() {
    let (result, output) = run_program(
        &[&push(0), GETC, &push(1), GETC, &push(1), LOAD, PUTC, &push(0), LOAD, PUTC],
        "ok",
    );
    result.unwrap();
    assert_eq!(output, "ko");
}

#[test]
fn test_input_char_multibyte() {
    let mut vm = load_vm(&[&push(0), GETC]);
    let (result, _) = run_vm(&mut vm, "感");
    result.unwrap();
    assert_eq!(vm.heap.load(0), Value::Character('感'));
}

#[test]
fn test_input_number() {
    let (result, output) = run_program(
        &[&push(7), GETN, &push(7), LOAD, &push(1), ADD, PUTN],
        "41\n",
    );
    result.unwrap();
    assert_eq!(output, "42");
}

#[test]
fn test_input_number_then_char() {
    let mut vm = load_vm(&[&push(0), GETN, &push(1), GETC, &push(2), GETC]);
    let (result, _) = run_vm(&mut vm, "-5\nx");
    result.unwrap();
    assert_eq!(vm.heap.load(0), Value::Integer(-5));
    assert_eq!(vm.heap.load(1), Value::Character('\n'));
    assert_eq!(vm.heap.load(2), Value::Character('x'));
}

#[test]
fn test_input_exhausted() {
    let (result, output) = run_program(&[&push(1), PUTN, &push(0), GETC], "");
    let Err(InterpretError::Io(err)) = result else {
        unreachable!("Expected I/O failure, got {:?}", result);
    };
    assert_eq!(err.kind(), ErrorKind::UnexpectedEof);
    assert_eq!(output, "1");
}

#[test]
fn test_input_number_malformed() {
    let (result, _) = run_program(&[&push(0), GETN], "abc");
    let Err(InterpretError::Io(err)) = result else {
        unreachable!("Expected I/O failure, got {:?}", result);
    };
    assert_eq!(err.kind(), ErrorKind::InvalidData);
}
