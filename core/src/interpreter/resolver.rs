//! Label resolution (pass 1)
//!
//! Walks the whole program through the decoder without executing anything, so
//! that every jump target is known before the first jump runs.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::decoder::decode;
use super::errors::{InterpretError, InterpretResult};
use super::types::{Instruction, Label, Program};

/// Label identifier -> position just after its definition
pub type LabelTable = HashMap<Label, usize>;

/// One line of a disassembly listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingEntry {
    pub position: usize,
    pub instruction: Instruction,
}

/* ===================== Walker ===================== */

/// Decode every instruction in order, calling `visit(position, instruction, next)`
///
/// Stops cleanly at the end of the program or at a single trailing line break.
/// Anything else the decoder cannot match is a malformed program.
pub fn walk<F>(program: &Program, mut visit: F) -> InterpretResult<()>
where
    F: FnMut(usize, Instruction, usize),
{
    let mut pc = 0;
    while pc < program.len() {
        match decode(program, pc)? {
            Some((instruction, next)) => {
                visit(pc, instruction, next);
                pc = next;
            }
            None if program.is_trailing_padding(pc) => break,
            None => return Err(InterpretError::MalformedProgram { position: pc }),
        }
    }
    Ok(())
}

/* ===================== Public API ===================== */

/// Build the label table for a program
///
/// A label defined twice resolves to its last definition.
pub fn resolve_labels(program: &Program) -> InterpretResult<LabelTable> {
    tracing::debug!(program = %program, "command list");

    let mut labels = LabelTable::new();
    walk(program, |position, instruction, next| {
        tracing::debug!(position, command = %instruction, "decoded");
        if let Instruction::Mark { label } = instruction {
            if let Some(previous) = labels.insert(label, next) {
                tracing::debug!(position, previous, "label redefined");
            }
        }
    })?;

    tracing::debug!(labels = labels.len(), "labels resolved");
    Ok(labels)
}

/// Decode the whole program into a listing
pub fn disassemble(program: &Program) -> InterpretResult<Vec<ListingEntry>> {
    let mut listing = Vec::new();
    walk(program, |position, instruction, _| {
        listing.push(ListingEntry {
            position,
            instruction,
        });
    })?;
    Ok(listing)
}
