//! Domain error types.
//!
//! Only configuration, adapters and the CLI produce these. Rule evaluation
//! absorbs missing or malformed data into `Unknown`/insufficient states instead.

/// Top-level error type for sessionsignal.
#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("failed to fetch {what}: {reason}")]
    Fetch { what: String, reason: String },

    #[error("invalid {what} payload: {reason}")]
    InvalidPayload { what: String, reason: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SignalError {
    pub(crate) fn invalid(section: &str, key: &str, reason: impl Into<String>) -> Self {
        SignalError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<&SignalError> for std::process::ExitCode {
    fn from(err: &SignalError) -> Self {
        let code: u8 = match err {
            SignalError::Io(_) | SignalError::Json(_) => 1,
            SignalError::ConfigParse { .. }
            | SignalError::ConfigMissing { .. }
            | SignalError::ConfigInvalid { .. } => 2,
            SignalError::Fetch { .. } | SignalError::InvalidPayload { .. } => 3,
        };
        std::process::ExitCode::from(code)
    }
}
