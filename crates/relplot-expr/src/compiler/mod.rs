//! Expression compiler.
//!
//! Converts infix text straight into a postfix [`Program`] with a single
//! left-to-right operator-precedence scan. No token list or syntax tree is
//! built.
//!
//! # Algorithm
//!
//! The scanner alternates between two states:
//!
//! - **Expecting an operand**: `(` opens a group; a numeric literal, or a
//!   variable name, is emitted and flips the state; a prefix operator is
//!   stacked; a function name directly followed by `(` stacks the function
//!   and opens a call group.
//! - **Expecting an operator**: `)` unwinds to the innermost group; `,`
//!   unwinds to the innermost group and starts the next argument; an infix
//!   operator first emits every stacked operator of equal or higher priority
//!   (left associativity), then is stacked; a suffix operator is emitted at
//!   once.
//!
//! Every category is matched by longest match against its
//! [`SymbolTrie`](crate::SymbolTrie). When a category has no complete
//! binding at the cursor, the next category is tried from the same position.
//!
//! Each open group remembers how many arguments it must close with (1 for a
//! plain group, the function's arity for a call), so any program this module
//! returns leaves exactly one value on the evaluator's stack.
//!
//! # Example
//!
//! ```
//! use relplot_expr::{Compiler, Environment};
//!
//! let env = Environment::with_builtins();
//! let program = Compiler::new(&env).compile("2 + 3 * 4").unwrap();
//! assert_eq!(program.to_string(), "2 3 4 * +");
//! ```

mod scanner;

use std::sync::Arc;

use tracing::{debug, trace};

use crate::error::CompileError;
use crate::program::Program;
use crate::symbols::{Environment, Fixity, Operator};
use scanner::Scanner;

/// Entry of the pending-operator stack.
#[derive(Debug)]
enum Pending {
    Operator(Arc<Operator>),
    /// An open `(`. For calls, the function sits directly beneath it.
    Group {
        offset: usize,
        expected: usize,
        commas: usize,
        call: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    Operand,
    Operator,
}

/// Compiles expressions against the tables of one [`Environment`].
#[derive(Debug, Clone, Copy)]
pub struct Compiler<'env> {
    env: &'env Environment,
}

impl<'env> Compiler<'env> {
    pub fn new(env: &'env Environment) -> Self {
        Self { env }
    }

    /// Compile `text` into a fresh program.
    pub fn compile(&self, text: &str) -> Result<Program, CompileError> {
        let mut program = Program::new();
        self.compile_into(&mut program, text)?;
        Ok(program)
    }

    /// Compile `text` and append its instructions to `program`.
    ///
    /// On failure `program` is left exactly as it was.
    pub fn compile_into(&self, program: &mut Program, text: &str) -> Result<(), CompileError> {
        let mut state = CompileState {
            env: self.env,
            scanner: Scanner::new(text),
            output: Program::new(),
            pending: Vec::new(),
            expect: Expect::Operand,
        };
        match state.run() {
            Ok(()) => {
                trace!(text, program = %state.output, "compiled expression");
                program.append(&mut state.output);
                Ok(())
            }
            Err(error) => {
                debug!(text, %error, "expression failed to compile");
                Err(error)
            }
        }
    }

    /// Offset of the first error in `text`, or `None` if it compiles.
    pub fn error_offset(&self, text: &str) -> Option<usize> {
        self.compile(text).err().map(|error| error.offset())
    }
}

/// Compile `text` against `env`.
pub fn compile(text: &str, env: &Environment) -> Result<Program, CompileError> {
    Compiler::new(env).compile(text)
}

struct CompileState<'a> {
    env: &'a Environment,
    scanner: Scanner<'a>,
    output: Program,
    pending: Vec<Pending>,
    expect: Expect,
}

impl CompileState<'_> {
    fn run(&mut self) -> Result<(), CompileError> {
        loop {
            self.scanner.skip_whitespace();
            let Some(ch) = self.scanner.peek() else {
                break;
            };
            match self.expect {
                Expect::Operand => self.operand(ch)?,
                Expect::Operator => self.operator(ch)?,
            }
        }
        self.finish()
    }

    fn operand(&mut self, ch: char) -> Result<(), CompileError> {
        let pos = self.scanner.pos();
        let text = self.scanner.text();

        if ch == '(' {
            self.scanner.bump();
            self.pending.push(Pending::Group {
                offset: pos,
                expected: 1,
                commas: 0,
                call: false,
            });
            return Ok(());
        }

        if ch.is_ascii_digit() {
            let literal = self.scanner.number();
            let value = literal
                .parse::<f64>()
                .map_err(|_| CompileError::InvalidNumber { offset: pos })?;
            self.output.push_literal(value);
            self.expect = Expect::Operator;
            return Ok(());
        }

        if let Some((end, op)) = self.env.operators(Fixity::Prefix).longest_match(text, pos) {
            self.pending.push(Pending::Operator(Arc::clone(op)));
            self.scanner.seek(end);
            return Ok(());
        }

        if let Some((end, func)) = self.env.operators(Fixity::Function).longest_match(text, pos) {
            if self.scanner.is_at(end, '(') {
                self.pending.push(Pending::Operator(Arc::clone(func)));
                self.pending.push(Pending::Group {
                    offset: end,
                    expected: func.arity(),
                    commas: 0,
                    call: true,
                });
                self.scanner.seek(end + 1);
                return Ok(());
            }
        }

        if let Some((end, var)) = self.env.variables().longest_match(text, pos) {
            self.output.push_variable(Arc::clone(var));
            self.scanner.seek(end);
            self.expect = Expect::Operator;
            return Ok(());
        }

        Err(CompileError::Syntax {
            offset: pos,
            found: ch,
        })
    }

    fn operator(&mut self, ch: char) -> Result<(), CompileError> {
        let pos = self.scanner.pos();
        let text = self.scanner.text();

        if ch == ')' {
            self.close_group(pos)?;
            self.scanner.bump();
            return Ok(());
        }

        if ch == ',' {
            self.next_argument(pos)?;
            self.scanner.bump();
            self.expect = Expect::Operand;
            return Ok(());
        }

        if let Some((end, op)) = self.env.operators(Fixity::Infix).longest_match(text, pos) {
            let priority = op.priority();
            while let Some(Pending::Operator(top)) = self.pending.last() {
                if top.priority() < priority {
                    break;
                }
                let top = Arc::clone(top);
                self.pending.pop();
                self.output.push_operator(top);
            }
            self.pending.push(Pending::Operator(Arc::clone(op)));
            self.scanner.seek(end);
            self.expect = Expect::Operand;
            return Ok(());
        }

        if let Some((end, op)) = self.env.operators(Fixity::Suffix).longest_match(text, pos) {
            self.output.push_operator(Arc::clone(op));
            self.scanner.seek(end);
            return Ok(());
        }

        Err(CompileError::Syntax {
            offset: pos,
            found: ch,
        })
    }

    /// Emit stacked operators down to the innermost group, leaving it open.
    fn flush_to_group(&mut self) -> Option<&mut Pending> {
        while let Some(Pending::Operator(_)) = self.pending.last() {
            if let Some(Pending::Operator(op)) = self.pending.pop() {
                self.output.push_operator(op);
            }
        }
        self.pending.last_mut()
    }

    fn next_argument(&mut self, pos: usize) -> Result<(), CompileError> {
        match self.flush_to_group() {
            Some(Pending::Group { commas, .. }) => {
                *commas += 1;
                Ok(())
            }
            _ => Err(CompileError::Syntax {
                offset: pos,
                found: ',',
            }),
        }
    }

    fn close_group(&mut self, pos: usize) -> Result<(), CompileError> {
        self.flush_to_group();
        let Some(Pending::Group {
            expected,
            commas,
            call,
            ..
        }) = self.pending.pop()
        else {
            return Err(CompileError::UnmatchedClose { offset: pos });
        };
        let found = commas + 1;
        if found != expected {
            return Err(CompileError::ArgumentCount {
                offset: pos,
                expected,
                found,
            });
        }
        if call {
            if let Some(Pending::Operator(func)) = self.pending.pop() {
                self.output.push_operator(func);
            }
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), CompileError> {
        if self.expect == Expect::Operand {
            return Err(CompileError::UnexpectedEnd {
                offset: self.scanner.text().len(),
            });
        }
        while let Some(entry) = self.pending.pop() {
            match entry {
                Pending::Operator(op) => self.output.push_operator(op),
                Pending::Group { offset, .. } => {
                    return Err(CompileError::UnmatchedOpen { offset });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn postfix(text: &str) -> String {
        let env = Environment::standard();
        compile(text, &env)
            .unwrap_or_else(|e| panic!("'{text}' should compile, got: {e}"))
            .to_string()
    }

    fn error(text: &str) -> CompileError {
        let env = Environment::standard();
        compile(text, &env).expect_err("should fail to compile")
    }

    #[test]
    fn test_emits_postfix_in_priority_order() {
        assert_eq!(postfix("2+3*4"), "2 3 4 * +");
        assert_eq!(postfix("(2+3)*4"), "2 3 + 4 *");
        assert_eq!(postfix("8/2/2"), "8 2 / 2 /");
    }

    #[test]
    fn test_function_call_emits_after_arguments() {
        assert_eq!(postfix("sin(x)^2"), "x sin 2 ^");
        assert_eq!(postfix("log(2, 1+7)"), "2 1 7 + log");
        assert_eq!(postfix("log(1+1, 8)"), "1 1 + 8 log");
    }

    fn factorial(args: &[f64]) -> f64 {
        (1..=args[0] as u64).map(|n| n as f64).product()
    }

    #[test]
    fn test_suffix_applies_to_the_operand_before_it() {
        let mut env = Environment::standard();
        env.register_suffix("!", factorial).unwrap();
        let postfix = |text: &str| compile(text, &env).unwrap().to_string();
        assert_eq!(postfix("3!+1"), "3 ! 1 +");
        assert_eq!(postfix("-3!"), "3 ! -");
        assert_eq!(postfix("2^3!"), "2 3 ! ^");
        assert_eq!(postfix("(1+2)!"), "1 2 + !");

        let value = |text: &str| crate::evaluate(&compile(text, &env).unwrap()).unwrap();
        assert_eq!(value("3!+1"), 7.0);
        assert_eq!(value("-3!"), -6.0);
        assert_eq!(value("2^3!"), 64.0);
    }

    #[test]
    fn test_suffix_is_not_an_operand() {
        let mut env = Environment::standard();
        env.register_suffix("!", factorial).unwrap();
        assert_eq!(
            compile("!3", &env).unwrap_err(),
            CompileError::Syntax { offset: 0, found: '!' }
        );
    }

    #[test]
    fn test_prefix_binds_looser_than_power() {
        assert_eq!(postfix("-2^2"), "2 2 ^ -");
        assert_eq!(postfix("2^-1"), "2 1 - ^");
    }

    #[test]
    fn test_function_without_paren_falls_back_to_variable() {
        let mut env = Environment::standard();
        env.register_variable("s").unwrap();
        // "sin" is not followed by '(', so the scan rewinds and tries variables;
        // only "s" is bound, leaving "in" as a syntax error.
        assert_eq!(
            compile("sin", &env).unwrap_err(),
            CompileError::Syntax {
                offset: 1,
                found: 'i'
            }
        );
    }

    #[test]
    fn test_whitespace_is_ignored() {
        assert_eq!(postfix("  sin( x )  +\t1 "), "x sin 1 +");
    }

    #[test]
    fn test_empty_and_trailing_operator_report_end() {
        assert_eq!(error(""), CompileError::UnexpectedEnd { offset: 0 });
        assert_eq!(error("2+"), CompileError::UnexpectedEnd { offset: 2 });
        assert_eq!(error("   "), CompileError::UnexpectedEnd { offset: 3 });
    }

    #[test]
    fn test_unmatched_parentheses() {
        assert_eq!(error("2+(3"), CompileError::UnmatchedOpen { offset: 2 });
        assert_eq!(error("2)"), CompileError::UnmatchedClose { offset: 1 });
    }

    #[test]
    fn test_argument_count_is_checked() {
        assert_eq!(
            error("log(8)"),
            CompileError::ArgumentCount {
                offset: 5,
                expected: 2,
                found: 1
            }
        );
        assert_eq!(
            error("(1, 2)"),
            CompileError::ArgumentCount {
                offset: 5,
                expected: 1,
                found: 2
            }
        );
        assert_eq!(
            error("1, 2"),
            CompileError::Syntax {
                offset: 1,
                found: ','
            }
        );
    }

    #[test]
    fn test_error_offset_is_non_raising() {
        let env = Environment::standard();
        let compiler = Compiler::new(&env);
        assert_eq!(compiler.error_offset("x*2"), None);
        assert_eq!(compiler.error_offset("x*#"), Some(2));
    }

    #[test]
    fn test_compile_into_preserves_program_on_failure() {
        let env = Environment::standard();
        let compiler = Compiler::new(&env);
        let mut program = compiler.compile("1").unwrap();
        assert!(compiler.compile_into(&mut program, "2+").is_err());
        assert_eq!(program.to_string(), "1");
        compiler.compile_into(&mut program, "2").unwrap();
        assert_eq!(program.to_string(), "1 2");
    }
}
