//! Error types.

use thiserror::Error;

/// Result type alias for fallible query-building operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for building queries.
///
/// Rendering never produces one of these: writing into a sink can only fail
/// with the sink's own `fmt::Error`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A table name, alias, or column name that is not a plain identifier.
    #[error("Invalid identifier: '{0}'")]
    InvalidIdentifier(String),

    /// An operator token outside the supported vocabulary.
    #[error("Unknown operator: '{0}'")]
    UnknownOperator(String),
}
