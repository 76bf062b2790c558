//! Tests for signature matching and instruction decoding

use super::helpers::tokens;
use crate::interpreter::decoder::{decode, encode_number, try_match, Operand, Signature};
use crate::interpreter::types::Token::{LineMark as L, SpaceMark as S, TabMark as T};
use crate::interpreter::types::{ArithOp, Instruction, Label, Program};
use crate::interpreter::InterpretError;

fn program(notation: &str) -> Program {
    Program::new(tokens(notation))
}

#[test]
fn test_number_operand_round_trip() {
    let values = [
        0,
        1,
        -1,
        5,
        -5,
        42,
        1024,
        -99_999,
        1 << 40,
        i64::MAX,
        -i64::MAX,
        i64::MIN,
    ];

    for n in values {
        let mut push = vec![S, S];
        push.extend(encode_number(n));
        let program = Program::new(push);

        let (instruction, next) = decode(&program, 0).unwrap().expect("push decodes");
        assert_eq!(instruction, Instruction::Push { value: n }, "value {}", n);
        assert_eq!(next, program.len(), "span of {}", n);
    }
}

#[test]
fn test_zero_has_no_digits() {
    assert_eq!(encode_number(0), vec![S, L]);
    let (instruction, _) = decode(&program("SS TL"), 0).unwrap().unwrap();
    assert_eq!(instruction, Instruction::Push { value: 0 });
}

#[test]
fn test_extra_mark_digit_counts_as_zero() {
    let (instruction, next) = decode(&program("SS S TET L"), 0).unwrap().unwrap();
    assert_eq!(instruction, Instruction::Push { value: 5 });
    assert_eq!(next, 7);
}

#[test]
fn test_non_space_sign_is_negative() {
    // A line break in sign position is consumed as the sign, not the terminator
    let (instruction, next) = decode(&program("SS L T L"), 0).unwrap().unwrap();
    assert_eq!(instruction, Instruction::Push { value: -1 });
    assert_eq!(next, 5);
}

#[test]
fn test_number_overflow_is_reported() {
    let notation = format!("SS S {} L", "T".repeat(64));
    let err = decode(&program(&notation), 0).unwrap_err();
    assert!(matches!(err, InterpretError::NumberOverflow { position: 0 }));
}

#[test]
fn test_two_to_the_63_fits_only_when_negative() {
    let digits = format!("T{}", "S".repeat(63));

    let negative = format!("SS T {} L", digits);
    let (instruction, _) = decode(&program(&negative), 0).unwrap().unwrap();
    assert_eq!(instruction, Instruction::Push { value: i64::MIN });

    let positive = format!("SS S {} L", digits);
    let err = decode(&program(&positive), 0).unwrap_err();
    assert!(matches!(err, InterpretError::NumberOverflow { position: 0 }));
}

#[test]
fn test_unterminated_operands_do_not_match() {
    assert!(decode(&program("SS STT"), 0).unwrap().is_none());
    assert!(decode(&program("SS"), 0).unwrap().is_none());
    assert!(decode(&program("LSS TST"), 0).unwrap().is_none());
}

#[test]
fn test_label_operand_is_raw_tokens() {
    let (instruction, next) = decode(&program("LSS TES L"), 0).unwrap().unwrap();
    let Instruction::Mark { label } = instruction else {
        unreachable!("Expected label definition, got {:?}", instruction);
    };
    assert_eq!(label.to_string(), "TES");
    assert_eq!(next, 7);
}

#[test]
fn test_empty_label() {
    let (instruction, next) = decode(&program("LSL L"), 0).unwrap().unwrap();
    assert_eq!(
        instruction,
        Instruction::Jump {
            label: Label::default()
        }
    );
    assert_eq!(next, 4);
}

#[test]
fn test_primary_table() {
    let cases = [
        ("SLS", Instruction::Duplicate),
        ("SLT", Instruction::Swap),
        ("SLL", Instruction::Discard),
        ("TTS", Instruction::Store),
        ("TTT", Instruction::Load),
        ("LTL", Instruction::Return),
        ("LLL", Instruction::End),
        ("TLSS", Instruction::OutputChar),
        ("TLST", Instruction::OutputNumber),
        ("TLTS", Instruction::InputChar),
        ("TLTT", Instruction::InputNumber),
        ("E", Instruction::DebugPrint),
    ];

    for (notation, expected) in cases {
        let program = program(notation);
        let (instruction, next) = decode(&program, 0).unwrap().expect(notation);
        assert_eq!(instruction, expected, "{}", notation);
        assert_eq!(next, program.len(), "{}", notation);
    }
}

#[test]
fn test_flow_control_signatures_carry_labels() {
    let label = Label::new(vec![S, T]);
    let cases = [
        ("LSS STL", Instruction::Mark { label: label.clone() }),
        ("LST STL", Instruction::Call { label: label.clone() }),
        ("LSL STL", Instruction::Jump { label: label.clone() }),
        ("LTS STL", Instruction::JumpIfZero { label: label.clone() }),
        ("LTT STL", Instruction::JumpIfNegative { label: label.clone() }),
    ];

    for (notation, expected) in cases {
        let (instruction, _) = decode(&program(notation), 0).unwrap().expect(notation);
        assert_eq!(instruction, expected, "{}", notation);
    }
}

#[test]
fn test_arithmetic_sub_selectors() {
    let cases = [
        ("TSSS", ArithOp::Add),
        ("TSST", ArithOp::Sub),
        ("TSSL", ArithOp::Mul),
        ("TSTS", ArithOp::Div),
        ("TSTT", ArithOp::Mod),
    ];

    for (notation, op) in cases {
        let (instruction, next) = decode(&program(notation), 0).unwrap().expect(notation);
        assert_eq!(instruction, Instruction::Arithmetic { op });
        assert_eq!(next, 4);
    }
}

#[test]
fn test_arithmetic_group_without_operator_is_no_match() {
    assert!(decode(&program("TS LL"), 0).unwrap().is_none());
    assert!(decode(&program("TS"), 0).unwrap().is_none());
    assert!(decode(&program("TS E"), 0).unwrap().is_none());
}

#[test]
fn test_decode_mid_program() {
    let program = program("SLS SLT LLL");
    let (instruction, next) = decode(&program, 3).unwrap().unwrap();
    assert_eq!(instruction, Instruction::Swap);
    assert_eq!(next, 6);
}

#[test]
fn test_try_match_prefix_only() {
    let program = program("SLS");
    let dup = Signature::plain(&[S, L, S]);
    let swap = Signature::plain(&[S, L, T]);

    assert_eq!(try_match(&program, 0, &dup).unwrap(), Some((3, Operand::None)));
    assert_eq!(try_match(&program, 0, &swap).unwrap(), None);
    // Prefix running past the end
    assert_eq!(try_match(&program, 1, &dup).unwrap(), None);
    assert_eq!(try_match(&program, 3, &dup).unwrap(), None);
}

#[test]
fn test_try_match_operands() {
    let number = Signature::number(&[S, S]);
    let label = Signature::label(&[L, S, S]);

    assert_eq!(
        try_match(&program("SS TTS L"), 0, &number).unwrap(),
        Some((6, Operand::Number(-2)))
    );
    assert_eq!(
        try_match(&program("LSS TT L"), 0, &label).unwrap(),
        Some((6, Operand::Label(Label::new(vec![T, T]))))
    );
}
