//! Relplot Expression Engine.
//!
//! Compiles algebraic text into reusable stack-machine programs and
//! evaluates them cheaply against live variable bindings.
//!
//! # Architecture
//!
//! ```text
//! text ──► Compiler ──► Program ──► Evaluator ──► f64
//!             │                        │
//!             ▼                        ▼
//!        Environment            Variable cells
//!     (five SymbolTries)     (read at call time)
//! ```
//!
//! - [`SymbolTrie`]: longest-match token lookup
//! - [`Environment`]: the variable, function, prefix, infix and suffix tables
//! - [`Compiler`]: operator-precedence scan emitting postfix directly
//! - [`Evaluator`]: replays a [`Program`] and returns one scalar
//! - [`Relation`]: `left REL right` compiled to a program for `left - right`
//!
//! # Example
//!
//! ```
//! use relplot_expr::{compile_relation, Environment, Evaluator};
//!
//! let env = Environment::standard();
//! let circle = compile_relation("x^2 + y^2 = 25", &env).unwrap();
//! let axes = env.axes().unwrap();
//!
//! axes.set(3.0, 4.0);
//! let mut evaluator = Evaluator::new();
//! assert_eq!(circle.evaluate(&mut evaluator), Ok(0.0));
//! ```

pub mod compiler;
pub mod error;
pub mod evaluator;
pub mod program;
pub mod relation;
pub mod symbols;
pub mod trie;

pub use compiler::{compile, Compiler};
pub use error::{CompileError, EvalError, RelationError, SymbolError};
pub use evaluator::{evaluate, Evaluator};
pub use program::{Instruction, Program};
pub use relation::{compile_relation, find_relational_operator, Relation, RelationKind};
pub use symbols::{
    Axes, Environment, Fixity, Operator, OperatorFn, Table, Variable, VariableKind,
    FUNCTION_PRIORITY, X_AXIS, Y_AXIS,
};
pub use trie::{SymbolTrie, TrieCursor, TrieNode};
