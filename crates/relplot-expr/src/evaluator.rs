//! Stack-machine evaluator.
//!
//! Replays a [`Program`] against the current values of its variables.
//! Literals and variables push; an operator pops exactly its arity (the most
//! recent value is its last argument) and pushes one result. A program is
//! well formed when it finishes with exactly one value on the stack.
//!
//! The evaluator owns its stack and clears it at the start of every call, so
//! one instance can be reused for every sample of a frame without
//! allocating.

use crate::error::EvalError;
use crate::program::{Instruction, Program};

/// Reusable evaluation stack.
#[derive(Debug, Default, Clone)]
pub struct Evaluator {
    stack: Vec<f64>,
}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluator whose stack can hold `depth` values before growing.
    pub fn with_capacity(depth: usize) -> Self {
        Self {
            stack: Vec::with_capacity(depth),
        }
    }

    /// Run `program` and return its single result.
    ///
    /// Non-finite values are ordinary results; only structural problems with
    /// the program are errors.
    pub fn evaluate(&mut self, program: &Program) -> Result<f64, EvalError> {
        self.stack.clear();
        for instruction in program {
            match instruction {
                Instruction::Literal(value) => self.stack.push(*value),
                Instruction::Variable(variable) => self.stack.push(variable.get()),
                Instruction::Apply(op) => {
                    let arity = op.arity();
                    let available = self.stack.len();
                    if arity > available {
                        return Err(EvalError::ArityMismatch {
                            operator: op.name().to_string(),
                            arity,
                            available,
                        });
                    }
                    let base = available - arity;
                    let result = op.apply(&self.stack[base..]);
                    self.stack.truncate(base);
                    self.stack.push(result);
                }
            }
        }
        match self.stack.as_slice() {
            [value] => Ok(*value),
            other => Err(EvalError::UnbalancedStack { depth: other.len() }),
        }
    }
}

/// Evaluate `program` with a throwaway stack.
pub fn evaluate(program: &Program) -> Result<f64, EvalError> {
    Evaluator::with_capacity(program.max_depth().unwrap_or(0)).evaluate(program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{compile, Environment};

    #[test]
    fn test_reads_variables_at_call_time() {
        let env = Environment::standard();
        let program = compile("x*10+y", &env).unwrap();
        let axes = env.axes().unwrap();
        let mut evaluator = Evaluator::new();

        axes.set(1.0, 2.0);
        assert_eq!(evaluator.evaluate(&program), Ok(12.0));
        axes.set(3.0, -1.0);
        assert_eq!(evaluator.evaluate(&program), Ok(29.0));
    }

    #[test]
    fn test_empty_program_is_unbalanced() {
        assert_eq!(
            evaluate(&Program::new()),
            Err(EvalError::UnbalancedStack { depth: 0 })
        );
    }

    #[test]
    fn test_operator_underflow_is_reported() {
        let env = Environment::with_builtins();
        let mut program = Program::new();
        program.push_literal(1.0);
        let plus = compile("1+1", &env).unwrap();
        if let Some(Instruction::Apply(op)) = plus.instructions().last() {
            program.push_operator(op.clone());
        }
        assert_eq!(
            evaluate(&program),
            Err(EvalError::ArityMismatch {
                operator: "+".to_string(),
                arity: 2,
                available: 1
            })
        );
    }

    #[test]
    fn test_leftover_values_are_reported() {
        let mut program = Program::new();
        program.push_literal(1.0);
        program.push_literal(2.0);
        assert_eq!(
            evaluate(&program),
            Err(EvalError::UnbalancedStack { depth: 2 })
        );
    }

    #[test]
    fn test_non_finite_results_pass_through() {
        let env = Environment::standard();
        assert_eq!(evaluate(&compile("1/0", &env).unwrap()), Ok(f64::INFINITY));
        assert!(evaluate(&compile("sqrt(0-1)", &env).unwrap()).unwrap().is_nan());
    }
}
