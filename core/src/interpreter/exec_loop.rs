//! Core execution loop (pass 2)
//!
//! ## Function Organization
//! 1. run_until_done() - Top-level driver (calls step repeatedly)
//! 2. step() - Decode the instruction at the cursor and dispatch it

use std::io::Write;

use super::decoder::decode;
use super::errors::{InterpretError, InterpretResult};
use super::instructions::execute;
use super::io::InputSource;
use super::vm::{Step, VM};

/* ===================== Public API ===================== */

/// Run the VM until it halts or fails
///
/// Output is flushed on the way out, whether the run succeeded or not, so
/// everything written before a failure reaches the sink.
pub fn run_until_done<I, W>(vm: &mut VM, input: &mut I, output: &mut W) -> InterpretResult<()>
where
    I: InputSource + ?Sized,
    W: Write + ?Sized,
{
    let result = loop {
        match step(vm, input, output) {
            Ok(Step::Continue) => continue,
            Ok(Step::Done) => break Ok(()),
            Err(err) => break Err(err),
        }
    };

    let flushed = output.flush();

    match &result {
        Ok(()) => tracing::debug!(steps = vm.steps, "program halted"),
        Err(err) => tracing::debug!(steps = vm.steps, position = vm.pc, %err, "program failed"),
    }

    result?;
    flushed?;
    Ok(())
}

/// Execute one instruction
///
/// Returns `Step::Done` once the program has halted: an explicit end
/// instruction, the cursor reaching the end, or a single trailing line break.
/// A step starting where the previous one started is a stall and reported as
/// a malformed program.
pub fn step<I, W>(vm: &mut VM, input: &mut I, output: &mut W) -> InterpretResult<Step>
where
    I: InputSource + ?Sized,
    W: Write + ?Sized,
{
    if vm.halted || vm.pc >= vm.program.len() {
        return Ok(Step::Done);
    }

    let position = vm.pc;
    tracing::debug!(position, stack = %vm.stack, "step");

    // Two steps starting at the same token can never make progress
    if vm.last_pc == Some(position) {
        return Err(InterpretError::MalformedProgram { position });
    }
    vm.last_pc = Some(position);

    let Some((instruction, next)) = decode(&vm.program, position)? else {
        if vm.program.is_trailing_padding(position) {
            vm.halted = true;
            return Ok(Step::Done);
        }
        return Err(InterpretError::MalformedProgram { position });
    };

    vm.pc = next;
    vm.steps += 1;
    execute(vm, &instruction, position, input, output)
}
