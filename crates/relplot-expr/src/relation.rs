//! Two-sided relations.
//!
//! A relation such as `x^2 + y^2 = 25` is compiled into one program that
//! computes `left - right`. Its zero set is the curve; its sign tells which
//! side of the curve a point lies on. The relational symbol is found by a
//! purely lexical scan before either side is compiled, so a relation has
//! exactly one comparison and the sides themselves never contain one.

use std::fmt;

use tracing::debug;

use crate::compiler::Compiler;
use crate::error::{EvalError, RelationError};
use crate::evaluator::Evaluator;
use crate::program::Program;
use crate::symbols::Environment;

/// Comparison a relation asserts between its two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    /// Not compiled, or failed to compile.
    Invalid,
}

impl RelationKind {
    /// Source spelling of the comparison.
    pub fn symbol(self) -> Option<&'static str> {
        match self {
            RelationKind::Equal => Some("="),
            RelationKind::NotEqual => Some("!="),
            RelationKind::Less => Some("<"),
            RelationKind::LessEqual => Some("<="),
            RelationKind::Greater => Some(">"),
            RelationKind::GreaterEqual => Some(">="),
            RelationKind::Invalid => None,
        }
    }

    /// Whether a point where `left - right == difference` satisfies the
    /// relation. NaN satisfies nothing; an invalid relation has no answer.
    pub fn is_satisfied_by(self, difference: f64) -> Option<bool> {
        let satisfied = match self {
            RelationKind::Equal => difference == 0.0,
            RelationKind::NotEqual => difference != 0.0 && !difference.is_nan(),
            RelationKind::Less => difference < 0.0,
            RelationKind::LessEqual => difference <= 0.0,
            RelationKind::Greater => difference > 0.0,
            RelationKind::GreaterEqual => difference >= 0.0,
            RelationKind::Invalid => return None,
        };
        Some(satisfied)
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol().unwrap_or("invalid"))
    }
}

/// Location of the relational symbol: byte offset, byte width and kind.
///
/// Only positions before the last character are considered, so a trailing
/// `=` is not a relation.
pub fn find_relational_operator(text: &str) -> Option<(usize, usize, RelationKind)> {
    let bytes = text.as_bytes();
    let last = bytes.len().checked_sub(1)?;
    let followed_by_eq = |pos: usize| bytes.get(pos + 1) == Some(&b'=');
    for pos in 0..last {
        let found = match bytes[pos] {
            b'=' => (1, RelationKind::Equal),
            b'<' if followed_by_eq(pos) => (2, RelationKind::LessEqual),
            b'<' => (1, RelationKind::Less),
            b'>' if followed_by_eq(pos) => (2, RelationKind::GreaterEqual),
            b'>' => (1, RelationKind::Greater),
            b'!' if followed_by_eq(pos) => (2, RelationKind::NotEqual),
            _ => continue,
        };
        return Some((pos, found.0, found.1));
    }
    None
}

/// An editable relation and its compiled program.
///
/// The source text survives compile failures so it can be edited further;
/// the program is only present while the relation is valid.
#[derive(Debug, Clone)]
pub struct Relation {
    text: String,
    kind: RelationKind,
    program: Program,
}

impl Relation {
    /// Uncompiled relation.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: RelationKind::Invalid,
            program: Program::new(),
        }
    }

    /// Relation compiled against `env`; invalid if compilation fails.
    pub fn compiled(text: impl Into<String>, env: &Environment) -> Self {
        let mut relation = Self::new(text);
        // `compile` logs the failure and leaves the relation invalid.
        relation.compile(env).ok();
        relation
    }

    /// Relation over a program assembled by the host.
    ///
    /// The program is trusted to compute `left - right`; one that does not
    /// leave exactly one value fails at evaluation time.
    pub fn with_program(text: impl Into<String>, kind: RelationKind, program: Program) -> Self {
        Self {
            text: text.into(),
            kind,
            program,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the source text. The relation is invalid until recompiled.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.invalidate();
    }

    pub fn kind(&self) -> RelationKind {
        self.kind
    }

    /// Program computing `left - right`; empty while invalid.
    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn is_valid(&self) -> bool {
        self.kind != RelationKind::Invalid
    }

    /// Drop the program and mark the relation invalid, keeping the text.
    pub fn invalidate(&mut self) {
        self.kind = RelationKind::Invalid;
        self.program.clear();
    }

    /// (Re)compile the current text.
    ///
    /// On failure the relation is left invalid with an empty program.
    pub fn compile(&mut self, env: &Environment) -> Result<(), RelationError> {
        self.invalidate();
        let (kind, program) = build(&self.text, env).inspect_err(|error| {
            debug!(text = %self.text, %error, offset = error.offset(), "relation invalid");
        })?;
        debug!(
            text = %self.text,
            %kind,
            instructions = program.len(),
            depth = ?program.max_depth(),
            "compiled relation"
        );
        self.kind = kind;
        self.program = program;
        Ok(())
    }

    /// Signed distance proxy `left - right` at the current variable values.
    pub fn evaluate(&self, evaluator: &mut Evaluator) -> Result<f64, EvalError> {
        evaluator.evaluate(&self.program)
    }
}

fn build(text: &str, env: &Environment) -> Result<(RelationKind, Program), RelationError> {
    let (split, width, kind) =
        find_relational_operator(text).ok_or(RelationError::NoRelationalOperator {
            offset: text.len(),
        })?;
    let right_start = split + width;
    let compiler = Compiler::new(env);
    let mut program = Program::new();
    compiler
        .compile_into(&mut program, &text[..split])
        .map_err(RelationError::Left)?;
    compiler
        .compile_into(&mut program, &text[right_start..])
        .map_err(|error| RelationError::Right(error.shifted(right_start)))?;
    program.push_operator(env.subtraction());
    Ok((kind, program))
}

/// Compile `text` as a relation against `env`.
pub fn compile_relation(text: &str, env: &Environment) -> Result<Relation, RelationError> {
    let mut relation = Relation::new(text);
    relation.compile(env)?;
    Ok(relation)
}
