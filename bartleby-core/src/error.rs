//! Error types for Bartleby

use thiserror::Error;

/// The main error type for Bartleby operations
#[derive(Error, Debug)]
pub enum Error {
    /// Statement shape the builder cannot render
    #[error("Unsupported statement: {message}")]
    UnsupportedStatement { message: String },
}

/// Convenience Result type for Bartleby operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a new unsupported statement error
    pub fn unsupported_statement(message: impl Into<String>) -> Self {
        Self::UnsupportedStatement {
            message: message.into(),
        }
    }
}
