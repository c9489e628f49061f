//! Error types for cellgrid operations.

use thiserror::Error;

/// Core error type for cellgrid operations.
///
/// Geometry and drawing never produce errors; these variants cover the
/// terminal device, buffer allocation and configuration loading.
#[derive(Error, Debug)]
pub enum Error {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal operation failed.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Invalid dimensions were provided.
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// The cell grid could not be allocated.
    #[error("Failed to allocate grid of {cells} cells")]
    Allocation {
        /// Number of cells requested
        cells: usize,
    },

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias using the core Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for color parsing operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    /// Input string was empty.
    #[error("empty input")]
    EmptyInput,

    /// Unknown color name.
    #[error("unknown color name: {0}")]
    UnknownColor(String),
}
