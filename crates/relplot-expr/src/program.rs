//! Linear postfix programs.
//!
//! A [`Program`] is the compiled form of an expression: a flat list of
//! [`Instruction`]s replayed left to right by the
//! [`Evaluator`](crate::Evaluator). There is no tree and no jump; the
//! compiler emits instructions in postfix order as it scans.
//!
//! Variables are held by handle, not by value, so a program compiled once
//! sees every later change to the variables it names.

use std::fmt;
use std::sync::Arc;

use crate::symbols::{Operator, Variable};

/// One step of a program.
#[derive(Debug, Clone)]
pub enum Instruction {
    /// Push a constant parsed from the source text.
    Literal(f64),
    /// Push the current value of a variable.
    Variable(Arc<Variable>),
    /// Pop `arity` values, push the result.
    Apply(Arc<Operator>),
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Literal(value) => write!(f, "{value}"),
            Instruction::Variable(var) => f.write_str(var.name()),
            Instruction::Apply(op) => f.write_str(op.name()),
        }
    }
}

/// A compiled expression.
#[derive(Debug, Clone, Default)]
pub struct Program {
    instructions: Vec<Instruction>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_literal(&mut self, value: f64) {
        self.instructions.push(Instruction::Literal(value));
    }

    pub fn push_variable(&mut self, variable: Arc<Variable>) {
        self.instructions.push(Instruction::Variable(variable));
    }

    pub fn push_operator(&mut self, operator: Arc<Operator>) {
        self.instructions.push(Instruction::Apply(operator));
    }

    /// Append every instruction of `other`.
    pub fn append(&mut self, other: &mut Program) {
        self.instructions.append(&mut other.instructions);
    }

    pub fn clear(&mut self) {
        self.instructions.clear();
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.instructions.iter()
    }

    /// Deepest stack the program reaches, or `None` if some operator would
    /// underflow.
    pub fn max_depth(&self) -> Option<usize> {
        let mut depth = 0usize;
        let mut max = 0usize;
        for instruction in &self.instructions {
            if let Instruction::Apply(op) = instruction {
                depth = depth.checked_sub(op.arity())?;
            }
            depth += 1;
            max = max.max(depth);
        }
        Some(max)
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.instructions.iter()
    }
}

/// Space-separated postfix form, e.g. `2 3 4 * +`.
impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, instruction) in self.instructions.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{instruction}")?;
        }
        Ok(())
    }
}
