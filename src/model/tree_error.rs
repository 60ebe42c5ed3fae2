//! Errors raised by tree restructuring operations.

use thiserror::Error;

/// Error type for operations on a [Tree](crate::model::Tree).
#[derive(Debug, Error, PartialEq, Clone)]
pub enum TreeError {
    /// No leaf carries the requested outgroup label.
    #[error("outgroup '{0}' not found among the leaves of the tree")]
    OutgroupNotFound(String),

    /// More than one leaf carries the requested outgroup label.
    #[error("outgroup '{label}' is ambiguous, {count} leaves carry this label")]
    AmbiguousOutgroup { label: String, count: usize },

    /// The tree has no root yet (construction not finished).
    #[error("tree has no root")]
    NoRoot,
}
