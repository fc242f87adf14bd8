use thiserror::Error;

#[derive(Debug, Error)]
pub enum HookError {
    #[error("unknown event '{0}' in hooks config")]
    UnknownEvent(String),

    #[error("hook '{0}' has an empty command")]
    EmptyCommand(String),

    #[error("duplicate hook name '{0}'")]
    DuplicateHookName(String),

    #[error("hook '{name}' has invalid timeout {timeout_ms}ms: must be > 0")]
    InvalidTimeout { name: String, timeout_ms: i64 },

    #[error("invalid matcher '{pattern}': {reason}")]
    InvalidMatcher { pattern: String, reason: String },

    #[error("config not found: {0}")]
    ConfigNotFound(String),

    #[error("aggregation inconsistency: {0}")]
    Inconsistency(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HookError>;
