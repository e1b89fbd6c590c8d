use thiserror::Error;

/// Errors produced by engine and grid operations.
///
/// All errors are local to the failing call: the engine validates before
/// mutating, so a returned error means no state changed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A cell coordinate fell outside the grid bounds on direct access.
    #[error("cell ({row}, {col}) out of range for {rows}x{cols} grid")]
    OutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// A history index was not a valid entry position.
    #[error("history index {index} out of range (length {length})")]
    IndexOutOfRange { index: usize, length: usize },

    /// A pattern name was not found in the library.
    #[error("unknown pattern: {0}")]
    PatternNotFound(String),

    /// A mutating operation was attempted while disallowed.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),
}
