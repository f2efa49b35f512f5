use thiserror::Error;

/// Top-level error type for tether-core.
#[derive(Debug, Error)]
pub enum TetherError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Reel error: {0}")]
    Reel(#[from] ReelError),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl ConfigError {
    /// Shorthand for [`ConfigError::InvalidValue`].
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Reel runtime errors.
///
/// Both variants that the force model raises are fatal: the caller is
/// expected to stop stepping the reel.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReelError {
    #[error("Reel anchor is not set to finite coordinates")]
    AnchorUnset,

    #[error("Tether exhausted: used length {used} reached tether length {limit}")]
    TetherExhausted { used: f32, limit: f32 },

    #[error("Body not found in world: {0}")]
    BodyMissing(String),
}
