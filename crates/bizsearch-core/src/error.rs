use thiserror::Error;

/// Contract violations raised by the domain layer.
///
/// Each variant marks state the caller should never be able to reach in
/// correct operation; callers decide whether to log, surface or abort.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("category index has not been built")]
    IndexNotBuilt,

    #[error("unknown sort field: {0}")]
    UnknownSortField(String),

    #[error("unknown sort direction: {0}")]
    UnknownSortDirection(String),

    #[error("unknown fetch mode: {0}")]
    UnknownFetchMode(String),

    /// A state field that the operation depends on is still unset.
    #[error("{0} must be set")]
    MissingState(&'static str),
}

/// Errors produced while loading [`crate::AppConfig`] from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
