use toolbox_core::CoreError;
use toolbox_uuid::UuidError;

/// Boxed cause carried by [`ProviderError::Failed`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised by providers, factories and resources.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("illegal state: {0}")]
    IllegalState(String),
    #[error("operation timed out: {0}")]
    OperationTimeout(String),
    #[error("not enough resource: {0}")]
    NotEnoughResource(String),
    #[error("operation aborted: {0}")]
    AbortOperation(String),
    #[error("unsupported operation: {0}")]
    Unsupported(String),
    /// Any other failure, usually wrapping the underlying cause.
    #[error("{message}")]
    Failed {
        message: String,
        #[source]
        source: Option<BoxError>,
    },
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Uuid(#[from] UuidError),
}

/// Coarse classification of a [`ProviderError`], for callers that branch on the kind of
/// failure rather than its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderErrorKind {
    InvalidArgument,
    IllegalState,
    OperationTimeout,
    NotEnoughResource,
    AbortOperation,
    Unsupported,
    Provider,
}

impl ProviderError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
            source: None,
        }
    }

    pub fn wrap(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Failed {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn kind(&self) -> ProviderErrorKind {
        match self {
            Self::InvalidArgument(_) => ProviderErrorKind::InvalidArgument,
            Self::IllegalState(_) => ProviderErrorKind::IllegalState,
            Self::OperationTimeout(_) => ProviderErrorKind::OperationTimeout,
            Self::NotEnoughResource(_) => ProviderErrorKind::NotEnoughResource,
            Self::AbortOperation(_) => ProviderErrorKind::AbortOperation,
            Self::Unsupported(_) => ProviderErrorKind::Unsupported,
            Self::Failed { .. } => ProviderErrorKind::Provider,
            Self::Core(e) if e.is_invalid_input() => ProviderErrorKind::InvalidArgument,
            Self::Core(e) if e.is_invalid_state() => ProviderErrorKind::IllegalState,
            Self::Core(_) => ProviderErrorKind::Provider,
            Self::Uuid(_) => ProviderErrorKind::InvalidArgument,
        }
    }
}

impl From<std::io::Error> for ProviderError {
    fn from(source: std::io::Error) -> Self {
        Self::wrap("I/O failure", source)
    }
}

pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_kinds() {
        assert_eq!(
            ProviderError::IllegalState("x".into()).kind(),
            ProviderErrorKind::IllegalState
        );
        assert_eq!(ProviderError::failed("boom").kind(), ProviderErrorKind::Provider);
        assert_eq!(
            ProviderError::from(CoreError::MissingProperty("name".into())).kind(),
            ProviderErrorKind::IllegalState
        );
        assert_eq!(
            ProviderError::from(CoreError::InvalidInput("bad".into())).kind(),
            ProviderErrorKind::InvalidArgument
        );
        let conversion = CoreError::Conversion {
            property: "port".into(),
            reason: "not a number".into(),
            source: None,
        };
        assert_eq!(
            ProviderError::from(conversion).kind(),
            ProviderErrorKind::InvalidArgument
        );
        assert_eq!(
            ProviderError::from(UuidError::InvalidInput("bad".into())).kind(),
            ProviderErrorKind::InvalidArgument
        );
    }

    #[test]
    fn test_wrap_keeps_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = ProviderError::from(io);
        assert_eq!(err.kind(), ProviderErrorKind::Provider);
        assert_eq!(err.source().map(ToString::to_string).as_deref(), Some("gone"));
        assert_eq!(err.to_string(), "I/O failure");
    }
}
