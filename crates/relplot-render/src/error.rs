//! Render errors.

use std::path::PathBuf;

use relplot_expr::EvalError;
use thiserror::Error;

/// Failure while tracing one relation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SampleError {
    /// The relation was not compiled, or an earlier failure invalidated it.
    #[error("relation is not valid")]
    InvalidRelation,

    /// The relation's program failed to evaluate. The relation has been
    /// invalidated and stays so until it is edited and recompiled.
    #[error("evaluation failed: {0}")]
    Evaluation(#[from] EvalError),
}

/// Invalid or unreadable configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
