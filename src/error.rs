//! Error types and handling for streetkey.

/// Result type alias for streetkey operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for streetkey operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The short address was empty or whitespace-only
    #[error("empty short address: {message}")]
    EmptyAddress {
        /// Error message
        message: String,
    },

    /// Parsing errors
    #[error("parse error: {message}")]
    ParseError {
        /// Error message
        message: String,
    },
}

impl Error {
    /// Create a new empty-address error
    pub fn empty_address(message: impl Into<String>) -> Self {
        Self::EmptyAddress {
            message: message.into(),
        }
    }

    /// Create a new parse error
    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::ParseError {
            message: message.into(),
        }
    }
}
