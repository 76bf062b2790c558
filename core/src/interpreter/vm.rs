//! Virtual Machine state
//!
//! The VM holds everything one run owns:
//! - program and label table (read-only once built)
//! - cursor, value stack, heap and call stack (mutated by execution)
//!
//! A VM is built per run and dropped afterwards; nothing is shared.

use std::collections::HashMap;
use std::fmt;

use super::errors::{InterpretError, InterpretResult};
use super::lexer::tokenize;
use super::resolver::{resolve_labels, LabelTable};
use super::types::{Label, Program, Value};

/* ===================== Value Stack ===================== */

/// LIFO operand stack
///
/// Every pop is checked; an empty stack is reported as `StackUnderflow`
/// against the instruction that needed the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueStack {
    values: Vec<Value>,
}

impl ValueStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.values
    }

    pub fn push(&mut self, value: Value) {
        self.values.push(value);
    }

    pub fn pop(&mut self, instruction: &'static str, position: usize) -> InterpretResult<Value> {
        self.values.pop().ok_or(InterpretError::StackUnderflow {
            instruction,
            position,
        })
    }

    pub fn peek(&self, instruction: &'static str, position: usize) -> InterpretResult<Value> {
        self.values
            .last()
            .copied()
            .ok_or(InterpretError::StackUnderflow {
                instruction,
                position,
            })
    }

    /// Fail unless at least `count` values are present
    ///
    /// Lets multi-operand instructions check before popping anything.
    pub fn ensure(
        &self,
        count: usize,
        instruction: &'static str,
        position: usize,
    ) -> InterpretResult<()> {
        if self.values.len() < count {
            return Err(InterpretError::StackUnderflow {
                instruction,
                position,
            });
        }
        Ok(())
    }
}

impl fmt::Display for ValueStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, "]")
    }
}

/* ===================== Heap ===================== */

/// Sparse address -> value store; unwritten cells read as `Unset`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Heap {
    cells: HashMap<i64, Value>,
}

impl Heap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&self, address: i64) -> Value {
        self.cells.get(&address).copied().unwrap_or_default()
    }

    pub fn store(&mut self, address: i64, value: Value) {
        self.cells.insert(address, value);
    }

    /// Number of cells ever written
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/* ===================== VM ===================== */

/// Virtual Machine state for one run
#[derive(Debug, Clone)]
pub struct VM {
    /// Token stream being executed
    pub program: Program,

    /// Jump targets from the label pass
    pub labels: LabelTable,

    /// Next token to decode
    pub pc: usize,

    /// Where the previous step started
    pub last_pc: Option<usize>,

    pub stack: ValueStack,

    pub heap: Heap,

    /// Return positions pushed by `call`
    pub call_stack: Vec<usize>,

    /// Set by the end-program instruction
    pub halted: bool,

    /// Instructions executed so far
    pub steps: u64,
}

impl VM {
    /// Create a VM for an already lexed and resolved program
    pub fn new(program: Program, labels: LabelTable) -> Self {
        VM {
            program,
            labels,
            pc: 0,
            last_pc: None,
            stack: ValueStack::new(),
            heap: Heap::new(),
            call_stack: Vec::new(),
            halted: false,
            steps: 0,
        }
    }

    /// Lex source text and run the label pass
    pub fn load(source: &str) -> InterpretResult<Self> {
        let program = tokenize(source)?;
        let labels = resolve_labels(&program)?;
        Ok(VM::new(program, labels))
    }

    /// Position recorded for `label`
    pub fn target(&self, label: &Label, position: usize) -> InterpretResult<usize> {
        self.labels
            .get(label)
            .copied()
            .ok_or_else(|| InterpretError::UnknownLabel {
                label: label.clone(),
                position,
            })
    }
}

/* ===================== Step Result ===================== */

/// Result of executing one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Continue to next step
    Continue,
    /// Execution complete
    Done,
}
