//! Error types for palaver-core

use thiserror::Error;

/// Main error type for the palaver-core library
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// A model token that does not follow `provider::identifier`
    #[error("invalid model token: {0}")]
    InvalidModelToken(String),

    /// A stored model record missing the identifier its provider requires
    #[error("incomplete model record for provider {provider:?}")]
    IncompleteModelRecord { provider: Option<String> },
}

/// Result type alias for palaver-core
pub type Result<T> = std::result::Result<T, Error>;
