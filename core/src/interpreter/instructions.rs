//! Instruction handlers
//!
//! One handler per instruction family. The cursor has already been moved past
//! the instruction when a handler runs; jumps overwrite it.

use std::io::Write;

use super::errors::{InterpretError, InterpretResult};
use super::io::InputSource;
use super::types::{ArithOp, Instruction, Value};
use super::vm::{Step, VM};

/// Literal written by the debug-print instruction
pub const DEBUG_LITERAL: &str = "かなり\n";

/// Execute one decoded instruction
///
/// `position` is where the instruction started; it is only used in errors.
pub fn execute<I, W>(
    vm: &mut VM,
    instruction: &Instruction,
    position: usize,
    input: &mut I,
    output: &mut W,
) -> InterpretResult<Step>
where
    I: InputSource + ?Sized,
    W: Write + ?Sized,
{
    let name = instruction.mnemonic();

    match instruction {
        /* ----- stack ----- */
        Instruction::Push { value } => vm.stack.push(Value::Integer(*value)),

        Instruction::Duplicate => {
            let top = vm.stack.peek(name, position)?;
            vm.stack.push(top);
        }

        Instruction::Swap => {
            vm.stack.ensure(2, name, position)?;
            let top = vm.stack.pop(name, position)?;
            let below = vm.stack.pop(name, position)?;
            vm.stack.push(top);
            vm.stack.push(below);
        }

        Instruction::Discard => {
            vm.stack.pop(name, position)?;
        }

        Instruction::Arithmetic { op } => execute_arithmetic(vm, *op, name, position)?,

        /* ----- heap ----- */
        Instruction::Store => {
            vm.stack.ensure(2, name, position)?;
            let value = vm.stack.pop(name, position)?;
            let address = vm.stack.pop(name, position)?.as_integer();
            vm.heap.store(address, value);
        }

        Instruction::Load => {
            let address = vm.stack.pop(name, position)?.as_integer();
            let value = vm.heap.load(address);
            vm.stack.push(value);
        }

        /* ----- flow control ----- */
        Instruction::Mark { .. } => {}

        Instruction::Call { label } => {
            let target = vm.target(label, position)?;
            vm.call_stack.push(vm.pc);
            vm.pc = target;
        }

        Instruction::Jump { label } => {
            vm.pc = vm.target(label, position)?;
        }

        Instruction::JumpIfZero { label } => {
            if vm.stack.pop(name, position)?.as_integer() == 0 {
                vm.pc = vm.target(label, position)?;
            }
        }

        Instruction::JumpIfNegative { label } => {
            if vm.stack.pop(name, position)?.as_integer() < 0 {
                vm.pc = vm.target(label, position)?;
            }
        }

        Instruction::Return => {
            vm.pc = vm
                .call_stack
                .pop()
                .ok_or(InterpretError::CallStackUnderflow { position })?;
        }

        Instruction::End => {
            vm.halted = true;
            return Ok(Step::Done);
        }

        /* ----- I/O ----- */
        Instruction::OutputChar => {
            if let Some(c) = vm.stack.pop(name, position)?.as_char() {
                write!(output, "{}", c)?;
            }
        }

        Instruction::OutputNumber => {
            let n = vm.stack.pop(name, position)?.as_integer();
            write!(output, "{}", n)?;
        }

        Instruction::InputChar => {
            output.flush()?;
            let c = input.read_char()?;
            let address = vm.stack.pop(name, position)?.as_integer();
            vm.heap.store(address, Value::Character(c));
        }

        Instruction::InputNumber => {
            output.flush()?;
            let n = input.read_number()?;
            let address = vm.stack.pop(name, position)?.as_integer();
            vm.heap.store(address, Value::Integer(n));
        }

        Instruction::DebugPrint => output.write_all(DEBUG_LITERAL.as_bytes())?,
    }

    Ok(Step::Continue)
}

/// Pop right then left, push `left op right`
///
/// Both operands are checked before either is popped.
fn execute_arithmetic(
    vm: &mut VM,
    op: ArithOp,
    name: &'static str,
    position: usize,
) -> InterpretResult<()> {
    vm.stack.ensure(2, name, position)?;
    let right = vm.stack.pop(name, position)?.as_integer();
    let left = vm.stack.pop(name, position)?.as_integer();

    let result = match op {
        ArithOp::Add => left.wrapping_add(right),
        ArithOp::Sub => left.wrapping_sub(right),
        ArithOp::Mul => left.wrapping_mul(right),
        ArithOp::Div | ArithOp::Mod if right == 0 => {
            return Err(InterpretError::DivisionByZero {
                instruction: name,
                position,
            })
        }
        ArithOp::Div => left.wrapping_div(right),
        ArithOp::Mod => left.wrapping_rem(right),
    };

    vm.stack.push(Value::Integer(result));
    Ok(())
}
