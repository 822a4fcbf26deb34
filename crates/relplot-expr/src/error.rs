//! Error types for symbol registration, compilation and evaluation.
//!
//! # Error Categories
//!
//! - **Registration**: [`SymbolError`], raised while populating an
//!   [`Environment`](crate::Environment)
//! - **Compilation**: [`CompileError`] for one expression, [`RelationError`]
//!   for a two-sided relation
//! - **Evaluation**: [`EvalError`], raised by the stack machine
//!
//! Every compile error carries the byte offset of the offending input so a
//! host can place a caret under it. Non-finite arithmetic results are not
//! errors; they flow through programs as ordinary values.

use thiserror::Error;

use crate::symbols::Table;

/// Failure to register a symbol.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymbolError {
    /// The name is already bound in the target table.
    #[error("{table} '{name}' is already defined")]
    Duplicate {
        /// Table the registration targeted.
        table: Table,
        /// The conflicting name.
        name: String,
    },

    /// The name cannot be spelled in an expression.
    ///
    /// Names must be non-empty and contain no whitespace, parentheses or
    /// commas. Variable and function names must not start with a digit or
    /// a dot, since those begin numeric literals.
    #[error("'{name}' is not a valid {table} name")]
    InvalidName {
        /// Table the registration targeted.
        table: Table,
        /// The rejected name.
        name: String,
    },

    /// Functions must take at least one argument.
    #[error("function '{name}' must take at least one argument")]
    ZeroArity {
        /// The rejected function name.
        name: String,
    },
}

/// Failure to compile an expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// A character that fits nothing valid at this point of the expression.
    #[error("syntax error at offset {offset}: unexpected '{found}'")]
    Syntax {
        /// Byte offset of the offending character.
        offset: usize,
        /// The offending character.
        found: char,
    },

    /// A `(` that is never closed.
    #[error("unmatched '(' at offset {offset}")]
    UnmatchedOpen {
        /// Byte offset of the opening parenthesis.
        offset: usize,
    },

    /// A `)` with no open group to close.
    #[error("unmatched ')' at offset {offset}")]
    UnmatchedClose {
        /// Byte offset of the closing parenthesis.
        offset: usize,
    },

    /// Input ended where an operand was required.
    ///
    /// Covers empty input as well as trailing operators such as `2+`.
    #[error("unexpected end of expression at offset {offset}")]
    UnexpectedEnd {
        /// Length of the input in bytes.
        offset: usize,
    },

    /// A call or group closed with the wrong number of comma-separated
    /// arguments, e.g. `log(8)` or `(1, 2)`.
    #[error("expected {expected} argument(s), found {found} at offset {offset}")]
    ArgumentCount {
        /// Byte offset of the closing parenthesis.
        offset: usize,
        /// Arguments the function takes (1 for a plain group).
        expected: usize,
        /// Arguments actually supplied.
        found: usize,
    },

    /// A numeric literal that does not parse as `f64`.
    #[error("invalid number at offset {offset}")]
    InvalidNumber {
        /// Byte offset of the first digit.
        offset: usize,
    },
}

impl CompileError {
    /// Byte offset the error refers to.
    pub fn offset(&self) -> usize {
        match self {
            CompileError::Syntax { offset, .. }
            | CompileError::UnmatchedOpen { offset }
            | CompileError::UnmatchedClose { offset }
            | CompileError::UnexpectedEnd { offset }
            | CompileError::ArgumentCount { offset, .. }
            | CompileError::InvalidNumber { offset } => *offset,
        }
    }

    /// Same error with its offset moved `by` bytes to the right.
    pub(crate) fn shifted(mut self, by: usize) -> Self {
        match &mut self {
            CompileError::Syntax { offset, .. }
            | CompileError::UnmatchedOpen { offset }
            | CompileError::UnmatchedClose { offset }
            | CompileError::UnexpectedEnd { offset }
            | CompileError::ArgumentCount { offset, .. }
            | CompileError::InvalidNumber { offset } => *offset += by,
        }
        self
    }
}

/// Failure to compile a relation `left REL right`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelationError {
    /// The text contains none of `= != < <= > >=`.
    #[error("no relational operator found")]
    NoRelationalOperator {
        /// Length of the text in bytes.
        offset: usize,
    },

    /// The left-hand side failed to compile.
    ///
    /// Offsets are already relative to the full relation text.
    #[error("left-hand side: {0}")]
    Left(#[source] CompileError),

    /// The right-hand side failed to compile.
    ///
    /// Offsets are already relative to the full relation text.
    #[error("right-hand side: {0}")]
    Right(#[source] CompileError),
}

impl RelationError {
    /// Byte offset into the full relation text.
    pub fn offset(&self) -> usize {
        match self {
            RelationError::NoRelationalOperator { offset } => *offset,
            RelationError::Left(error) | RelationError::Right(error) => error.offset(),
        }
    }
}

/// Failure while executing a program.
///
/// Programs produced by the compiler never raise these; they guard against
/// hand-assembled or truncated programs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// An operator needed more operands than the stack held.
    #[error("operator '{operator}' needs {arity} operand(s), stack holds {available}")]
    ArityMismatch {
        /// Name of the operator.
        operator: String,
        /// Operands it consumes.
        arity: usize,
        /// Values available on the stack.
        available: usize,
    },

    /// The program did not leave exactly one value.
    #[error("program left {depth} value(s) on the stack, expected 1")]
    UnbalancedStack {
        /// Final stack depth.
        depth: usize,
    },
}
