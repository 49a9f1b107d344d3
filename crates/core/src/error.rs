use async_openai::error::OpenAIError;

/// The three ways an interview cycle can fail.
///
/// Every variant bubbles up to the caller of
/// [`Interviewer::respond_to`](crate::interviewer::Interviewer::respond_to);
/// nothing is retried inside the core.
#[derive(Debug, thiserror::Error)]
pub enum InterviewError {
    /// Missing or invalid credential. Fatal at session start.
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// Transport failure, timeout, empty content or an explicit backend error.
    #[error("Upstream error: {0}")]
    Upstream(String),
    /// An ordering invariant of the turn log was broken.
    #[error("Protocol violation: {0}")]
    ProtocolViolation(String),
    /// Console or transcript I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl InterviewError {
    /// Whether the interactive loop may let the candidate try the same answer again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, InterviewError::Upstream(_))
    }
}

impl From<OpenAIError> for InterviewError {
    fn from(err: OpenAIError) -> Self {
        InterviewError::Upstream(err.to_string())
    }
}

pub type Result<T, E = InterviewError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = InterviewError::Upstream("connection reset".to_string());
        assert_eq!(format!("{}", err), "Upstream error: connection reset");

        let err = InterviewError::Configuration("ANTHROPIC_API_KEY".to_string());
        assert_eq!(format!("{}", err), "Configuration error: ANTHROPIC_API_KEY");
    }

    #[test]
    fn test_only_upstream_is_retryable() {
        assert!(InterviewError::Upstream("timeout".into()).is_retryable());
        assert!(!InterviewError::Configuration("key".into()).is_retryable());
        assert!(!InterviewError::ProtocolViolation("order".into()).is_retryable());
    }

    #[test]
    fn test_openai_error_maps_to_upstream() {
        let err: InterviewError = OpenAIError::InvalidArgument("bad request".into()).into();
        assert!(matches!(err, InterviewError::Upstream(msg) if msg.contains("bad request")));
    }
}
