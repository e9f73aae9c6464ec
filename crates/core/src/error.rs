use std::path::PathBuf;

/// Errors raised by the helper, settings and serialization modules.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid state: {0}")]
    InvalidState(String),
    #[error("cannot assign property [{property}]: {reason}")]
    Conversion {
        property: String,
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
    #[error("missing value for not null property [{0}]")]
    MissingProperty(String),
    #[error("failed to serialize value: {0}")]
    Serialization(serde_json::Error),
    #[error(
        "could not load settings from {path}: {source}",
        path = path.display()
    )]
    BackingStore {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings at line {line}: {reason}")]
    InvalidSettings { line: usize, reason: String },
}

impl CoreError {
    /// Returns true for errors caused by caller-supplied input (the argument kind).
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::Conversion { .. })
    }

    /// Returns true for errors caused by calling an operation in the wrong state.
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Self::InvalidState(_) | Self::MissingProperty(_))
    }
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
