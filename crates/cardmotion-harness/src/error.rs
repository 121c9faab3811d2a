use cardmotion_runtime::CardConfigError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, HarnessError>;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(#[from] CardConfigError),

    #[error("trace line {line}: {source}")]
    TraceLine {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid trace: {message}")]
    InvalidTrace { message: String },

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl HarnessError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::TraceLine { .. } | Self::InvalidTrace { .. } => 3,
            _ => 1,
        }
    }

    #[must_use]
    pub fn invalid_trace(message: impl Into<String>) -> Self {
        Self::InvalidTrace {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::HarnessError;
    use cardmotion_runtime::CardConfigError;

    #[test]
    fn config_errors_exit_with_two() {
        let error = HarnessError::from(CardConfigError::Validation(vec!["swipe.velocity".into()]));
        assert_eq!(error.exit_code(), 2);
        assert!(error.to_string().contains("swipe.velocity"));
    }

    #[test]
    fn trace_errors_exit_with_three() {
        let error = HarnessError::invalid_trace("header must come first");
        assert_eq!(error.exit_code(), 3);
        assert_eq!(error.to_string(), "invalid trace: header must come first");
    }

    #[test]
    fn other_errors_exit_with_one() {
        assert_eq!(HarnessError::invalid("fps").exit_code(), 1);
    }
}
