//! Token tables.
//!
//! An [`Environment`] owns the five tables the compiler consults:
//! variables, functions, prefix operators, infix operators and suffix
//! operators. Each is an independent [`SymbolTrie`], so the same spelling
//! may mean different things in different positions (`-` is both a prefix
//! and an infix operator).
//!
//! Tables are written only while the host registers symbols (`&mut self`)
//! and are read-only during compilation. Variables are handed out as
//! `Arc<Variable>`; compiled programs keep those handles, so a variable
//! outlives the environment if a program still refers to it.

mod builtins;
mod operator;
mod variable;

use std::fmt;
use std::sync::Arc;

use tracing::debug;

pub use operator::{Fixity, Operator, OperatorFn, FUNCTION_PRIORITY};
pub use variable::{Variable, VariableKind};

use crate::error::SymbolError;
use crate::trie::SymbolTrie;

/// Name of the horizontal plot axis in [`Environment::standard`].
pub const X_AXIS: &str = "x";
/// Name of the vertical plot axis in [`Environment::standard`].
pub const Y_AXIS: &str = "y";

/// One of the five token tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Variables,
    Functions,
    Prefix,
    Infix,
    Suffix,
}

impl From<Fixity> for Table {
    fn from(fixity: Fixity) -> Self {
        match fixity {
            Fixity::Prefix => Table::Prefix,
            Fixity::Infix => Table::Infix,
            Fixity::Suffix => Table::Suffix,
            Fixity::Function => Table::Functions,
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Table::Variables => "variable",
            Table::Functions => "function",
            Table::Prefix => "prefix operator",
            Table::Infix => "infix operator",
            Table::Suffix => "suffix operator",
        };
        f.write_str(name)
    }
}

/// Handles to the two free variables driven by the plot.
#[derive(Debug, Clone)]
pub struct Axes {
    pub x: Arc<Variable>,
    pub y: Arc<Variable>,
}

impl Axes {
    /// Set both axes for the next evaluation.
    #[inline]
    pub fn set(&self, x: f64, y: f64) {
        self.x.set(x);
        self.y.set(y);
    }
}

/// The symbol tables used to compile expressions.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    variables: SymbolTrie<Arc<Variable>>,
    functions: SymbolTrie<Arc<Operator>>,
    prefix: SymbolTrie<Arc<Operator>>,
    infix: SymbolTrie<Arc<Operator>>,
    suffix: SymbolTrie<Arc<Operator>>,
}

impl Environment {
    /// Environment with all five tables empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Environment holding the built-in operators, functions and constants.
    pub fn with_builtins() -> Self {
        let mut env = Self::new();
        for &(name, priority, func) in builtins::INFIX {
            env.insert_operator(Operator::new(name, Fixity::Infix, 2, priority, func));
        }
        for &(name, func) in builtins::PREFIX {
            env.insert_operator(Operator::new(
                name,
                Fixity::Prefix,
                1,
                builtins::PREFIX_PRIORITY,
                func,
            ));
        }
        for &(name, func) in builtins::UNARY_FUNCTIONS {
            env.insert_operator(Operator::new(name, Fixity::Function, 1, FUNCTION_PRIORITY, func));
        }
        for &(name, func) in builtins::BINARY_FUNCTIONS {
            env.insert_operator(Operator::new(name, Fixity::Function, 2, FUNCTION_PRIORITY, func));
        }
        for &(name, value) in builtins::CONSTANTS {
            env.variables.insert(
                name,
                Arc::new(Variable::new(name, VariableKind::Const, value)),
            );
        }
        debug!(
            functions = env.functions.len(),
            operators = env.prefix.len() + env.infix.len(),
            constants = env.variables.len(),
            "installed builtins"
        );
        env
    }

    /// Builtins plus the free plot axes `x` and `y`.
    pub fn standard() -> Self {
        let mut env = Self::with_builtins();
        for name in [X_AXIS, Y_AXIS] {
            env.variables.insert(
                name,
                Arc::new(Variable::new(name, VariableKind::Free, 0.0)),
            );
        }
        env
    }

    // === Registration ===

    /// Register a free variable, initialised to zero.
    pub fn register_variable(&mut self, name: &str) -> Result<Arc<Variable>, SymbolError> {
        self.insert_variable(name, VariableKind::Free, 0.0)
    }

    /// Register a constant.
    pub fn register_constant(
        &mut self,
        name: &str,
        value: f64,
    ) -> Result<Arc<Variable>, SymbolError> {
        self.insert_variable(name, VariableKind::Const, value)
    }

    /// Register a function called as `name(a, b, ...)`.
    pub fn register_function(
        &mut self,
        name: &str,
        arity: usize,
        func: OperatorFn,
    ) -> Result<Arc<Operator>, SymbolError> {
        if arity == 0 {
            return Err(SymbolError::ZeroArity {
                name: name.to_string(),
            });
        }
        self.register(Operator::new(name, Fixity::Function, arity, FUNCTION_PRIORITY, func))
    }

    /// Register a unary operator written before its operand.
    pub fn register_prefix(
        &mut self,
        name: &str,
        priority: u8,
        func: OperatorFn,
    ) -> Result<Arc<Operator>, SymbolError> {
        self.register(Operator::new(name, Fixity::Prefix, 1, priority, func))
    }

    /// Register a left-associative binary operator.
    pub fn register_infix(
        &mut self,
        name: &str,
        priority: u8,
        func: OperatorFn,
    ) -> Result<Arc<Operator>, SymbolError> {
        self.register(Operator::new(name, Fixity::Infix, 2, priority, func))
    }

    /// Register a unary operator written after its operand.
    ///
    /// Suffix operators apply as soon as they are read, so they bind tighter
    /// than everything but parentheses.
    pub fn register_suffix(
        &mut self,
        name: &str,
        func: OperatorFn,
    ) -> Result<Arc<Operator>, SymbolError> {
        self.register(Operator::new(name, Fixity::Suffix, 1, FUNCTION_PRIORITY, func))
    }

    /// Remove a variable or constant. Programs already holding it keep
    /// their handle.
    pub fn unregister_variable(&mut self, name: &str) -> Option<Arc<Variable>> {
        let removed = self.variables.get(name).cloned()?;
        self.variables.erase(name);
        Some(removed)
    }

    // === Lookup ===

    pub fn variable(&self, name: &str) -> Option<&Arc<Variable>> {
        self.variables.get(name)
    }

    pub fn function(&self, name: &str) -> Option<&Arc<Operator>> {
        self.functions.get(name)
    }

    /// The free variables `x` and `y`, if both are registered.
    pub fn axes(&self) -> Option<Axes> {
        let free = |name: &str| {
            self.variables
                .get(name)
                .filter(|v| v.kind() == VariableKind::Free)
                .cloned()
        };
        Some(Axes {
            x: free(X_AXIS)?,
            y: free(Y_AXIS)?,
        })
    }

    /// Operator table for `fixity`, for the compiler's longest-match scans.
    pub(crate) fn operators(&self, fixity: Fixity) -> &SymbolTrie<Arc<Operator>> {
        match fixity {
            Fixity::Function => &self.functions,
            Fixity::Prefix => &self.prefix,
            Fixity::Infix => &self.infix,
            Fixity::Suffix => &self.suffix,
        }
    }

    pub(crate) fn variables(&self) -> &SymbolTrie<Arc<Variable>> {
        &self.variables
    }

    /// Binary subtraction used to join the two sides of a relation.
    ///
    /// Prefers the registered infix `-`; falls back to a private instance if
    /// the host has replaced it with something that is not binary.
    pub(crate) fn subtraction(&self) -> Arc<Operator> {
        self.infix
            .get("-")
            .filter(|op| op.arity() == 2)
            .cloned()
            .unwrap_or_else(|| {
                Arc::new(Operator::new(
                    "-",
                    Fixity::Infix,
                    2,
                    builtins::SUM_PRIORITY,
                    builtins::subtract,
                ))
            })
    }

    /// Names bound in `table`, sorted.
    pub fn names(&self, table: Table) -> Vec<String> {
        match table {
            Table::Variables => self.variables.names(),
            Table::Functions => self.functions.names(),
            Table::Prefix => self.prefix.names(),
            Table::Infix => self.infix.names(),
            Table::Suffix => self.suffix.names(),
        }
    }

    // === Internals ===

    fn insert_variable(
        &mut self,
        name: &str,
        kind: VariableKind,
        value: f64,
    ) -> Result<Arc<Variable>, SymbolError> {
        validate_name(Table::Variables, name)?;
        let variable = Arc::new(Variable::new(name, kind, value));
        if !self.variables.insert(name, Arc::clone(&variable)) {
            return Err(SymbolError::Duplicate {
                table: Table::Variables,
                name: name.to_string(),
            });
        }
        debug!(name, ?kind, "registered variable");
        Ok(variable)
    }

    fn register(&mut self, op: Operator) -> Result<Arc<Operator>, SymbolError> {
        let table = Table::from(op.fixity());
        validate_name(table, op.name())?;
        let name = op.name().to_string();
        let op = Arc::new(op);
        if !self.trie_mut(op.fixity()).insert(&name, Arc::clone(&op)) {
            return Err(SymbolError::Duplicate { table, name });
        }
        debug!(%table, name = %name, arity = op.arity(), priority = op.priority(), "registered operator");
        Ok(op)
    }

    fn insert_operator(&mut self, op: Operator) {
        let name = op.name().to_string();
        self.trie_mut(op.fixity()).insert(&name, Arc::new(op));
    }

    fn trie_mut(&mut self, fixity: Fixity) -> &mut SymbolTrie<Arc<Operator>> {
        match fixity {
            Fixity::Function => &mut self.functions,
            Fixity::Prefix => &mut self.prefix,
            Fixity::Infix => &mut self.infix,
            Fixity::Suffix => &mut self.suffix,
        }
    }
}

fn validate_name(table: Table, name: &str) -> Result<(), SymbolError> {
    let invalid = || SymbolError::InvalidName {
        table,
        name: name.to_string(),
    };
    let first = name.chars().next().ok_or_else(invalid)?;
    if name
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '(' | ')' | ','))
    {
        return Err(invalid());
    }
    let starts_number = first.is_ascii_digit() || first == '.';
    if starts_number && matches!(table, Table::Variables | Table::Functions) {
        return Err(invalid());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(args: &[f64]) -> f64 {
        args[0] * args[0]
    }

    #[test]
    fn test_standard_environment_has_axes_and_constants() {
        let env = Environment::standard();
        let axes = env.axes().expect("standard environment has axes");
        assert_eq!(axes.x.name(), "x");
        assert_eq!(axes.y.kind(), VariableKind::Free);
        assert_eq!(env.variable("pi").map(|v| v.kind()), Some(VariableKind::Const));
        assert!(Environment::with_builtins().axes().is_none());
    }

    #[test]
    fn test_builtin_tables_are_populated() {
        let env = Environment::with_builtins();
        assert_eq!(env.names(Table::Infix), vec!["%", "*", "+", "-", "/", "^"]);
        assert_eq!(env.names(Table::Prefix), vec!["+", "-"]);
        assert!(env.names(Table::Suffix).is_empty());
        assert_eq!(env.function("log").map(|f| f.arity()), Some(2));
        assert_eq!(env.function("sin").map(|f| f.priority()), Some(FUNCTION_PRIORITY));
    }

    #[test]
    fn test_duplicate_registration_is_rejected() {
        let mut env = Environment::standard();
        let err = env.register_variable("x").unwrap_err();
        assert_eq!(
            err,
            SymbolError::Duplicate {
                table: Table::Variables,
                name: "x".to_string()
            }
        );
        assert!(env.register_function("sin", 1, square).is_err());
        // Same spelling in a different table is fine.
        assert!(env.register_suffix("-", square).is_ok());
    }

    #[test]
    fn test_invalid_names_are_rejected() {
        let mut env = Environment::new();
        assert!(matches!(
            env.register_variable(""),
            Err(SymbolError::InvalidName { .. })
        ));
        assert!(matches!(
            env.register_variable("2x"),
            Err(SymbolError::InvalidName { .. })
        ));
        assert!(matches!(
            env.register_function("f g", 1, square),
            Err(SymbolError::InvalidName { .. })
        ));
        assert!(matches!(
            env.register_infix("(", 1, square),
            Err(SymbolError::InvalidName { .. })
        ));
        assert!(matches!(
            env.register_function("nil", 0, square),
            Err(SymbolError::ZeroArity { .. })
        ));
    }

    #[test]
    fn test_unregister_variable_keeps_existing_handles() {
        let mut env = Environment::new();
        let t = env.register_variable("t").unwrap();
        t.set(4.0);
        let removed = env.unregister_variable("t").expect("was registered");
        assert!(env.variable("t").is_none());
        assert_eq!(removed.get(), 4.0);
        assert!(env.unregister_variable("t").is_none());
    }

    #[test]
    fn test_subtraction_falls_back_when_minus_is_missing() {
        let env = Environment::new();
        let sub = env.subtraction();
        assert_eq!(sub.apply(&[5.0, 3.0]), 2.0);

        let builtin = Environment::with_builtins();
        let registered = builtin.subtraction();
        assert!(Arc::ptr_eq(&registered, builtin.infix.get("-").unwrap()));
    }
}
