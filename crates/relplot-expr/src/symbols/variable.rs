//! Named scalar cells.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Whether a variable is driven from outside or fixed at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableKind {
    /// Overwritten by the host before each evaluation, e.g. the plot axes.
    Free,
    /// Fixed value such as `pi`.
    Const,
}

/// A mutable named scalar shared by reference between programs.
///
/// Programs hold `Arc<Variable>` handles and read the cell at evaluation
/// time, so a single [`set`](Self::set) affects every program naming it.
/// The value is stored as `f64` bits in an atomic so handles stay
/// `Send + Sync`; the sampler treats "set both axes, then evaluate" as one
/// step and never relies on cross-thread ordering.
pub struct Variable {
    name: String,
    kind: VariableKind,
    cell: AtomicU64,
}

impl Variable {
    pub(crate) fn new(name: impl Into<String>, kind: VariableKind, value: f64) -> Self {
        Self {
            name: name.into(),
            kind,
            cell: AtomicU64::new(value.to_bits()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> VariableKind {
        self.kind
    }

    /// Current value.
    #[inline]
    pub fn get(&self) -> f64 {
        f64::from_bits(self.cell.load(Ordering::Relaxed))
    }

    /// Overwrite the value of a free variable.
    ///
    /// Constants are left unchanged and `false` is returned.
    #[inline]
    pub fn set(&self, value: f64) -> bool {
        if self.kind == VariableKind::Const {
            return false;
        }
        self.cell.store(value.to_bits(), Ordering::Relaxed);
        true
    }
}

impl fmt::Debug for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Variable")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("value", &self.get())
            .finish()
    }
}
