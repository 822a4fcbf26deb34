//! Operator and function descriptors.

use std::fmt;

/// Signature shared by every operator and function.
///
/// Arguments arrive in source order: `args[0]` is the leftmost operand.
pub type OperatorFn = fn(&[f64]) -> f64;

/// Priority given to functions so a call binds tighter than any operator.
pub const FUNCTION_PRIORITY: u8 = u8::MAX;

/// How an operator is written relative to its operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fixity {
    /// `-x`
    Prefix,
    /// `a + b`
    Infix,
    /// `x!`
    Suffix,
    /// `log(b, x)`
    Function,
}

impl fmt::Display for Fixity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Fixity::Prefix => "prefix",
            Fixity::Infix => "infix",
            Fixity::Suffix => "suffix",
            Fixity::Function => "function",
        };
        f.write_str(name)
    }
}

/// A pure operation of fixed arity.
///
/// Operators are immutable once registered and are shared by every program
/// that applies them.
#[derive(Clone)]
pub struct Operator {
    name: String,
    fixity: Fixity,
    arity: usize,
    priority: u8,
    func: OperatorFn,
}

impl Operator {
    pub(crate) fn new(
        name: impl Into<String>,
        fixity: Fixity,
        arity: usize,
        priority: u8,
        func: OperatorFn,
    ) -> Self {
        Self {
            name: name.into(),
            fixity,
            arity,
            priority,
            func,
        }
    }

    /// Token spelling, e.g. `+` or `sqrt`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fixity(&self) -> Fixity {
        self.fixity
    }

    /// Number of values consumed from the stack.
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Binding strength; higher binds tighter.
    pub fn priority(&self) -> u8 {
        self.priority
    }

    /// Apply to exactly [`arity`](Self::arity) arguments.
    #[inline]
    pub fn apply(&self, args: &[f64]) -> f64 {
        debug_assert_eq!(args.len(), self.arity);
        (self.func)(args)
    }
}

impl fmt::Debug for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operator")
            .field("name", &self.name)
            .field("fixity", &self.fixity)
            .field("arity", &self.arity)
            .field("priority", &self.priority)
            .finish()
    }
}
