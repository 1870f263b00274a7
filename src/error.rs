//! Error types for the call studio.
//!
//! The simulator itself never fails: empty replies, missing voice support,
//! and ending an idle call all degrade to no-ops. Errors only come from the
//! edges: configuration, user-supplied identifiers, and terminal I/O.

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Unknown identifiers supplied by the user or the environment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    #[error("Unknown tone: {0}")]
    UnknownTone(String),

    #[error("Unknown script stage: {0}")]
    UnknownStage(String),

    #[error("Unknown call outcome: {0}")]
    UnknownOutcome(String),
}

/// Presentation channel errors.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("Failed to read input on channel {name}: {reason}")]
    ReadFailed { name: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Voice adapter errors. The engine logs and drops these.
#[derive(Debug, thiserror::Error)]
pub enum VoiceError {
    #[error("Voice capability not supported: {0}")]
    Unsupported(&'static str),
}

/// Result type alias for the studio.
pub type Result<T> = std::result::Result<T, Error>;
