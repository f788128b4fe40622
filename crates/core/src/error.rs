use std::fmt;
use thiserror::Error;

/// Closed error taxonomy surfaced to callers. Every failure inside the
/// analysis pipeline maps to exactly one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    RateLimit,
    Network,
    MalformedResponse,
    EmptyQuery,
    Unknown,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RateLimit => write!(f, "RATE_LIMIT"),
            Self::Network => write!(f, "NETWORK"),
            Self::MalformedResponse => write!(f, "MALFORMED_RESPONSE"),
            Self::EmptyQuery => write!(f, "EMPTY_QUERY"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Failure of a single analysis request. The variant payloads carry
/// developer-facing detail for logs; `user_message` is the only text that
/// may reach an end user.
#[derive(Debug, Clone, Error)]
pub enum AnalysisError {
    #[error("provider rate limit hit: {0}")]
    RateLimit(String),

    #[error("network failure talking to the provider: {0}")]
    Network(String),

    #[error("model response did not match the expected shape: {0}")]
    MalformedResponse(String),

    #[error("input payload is empty")]
    EmptyQuery,

    #[error("{0}")]
    Unknown(String),
}

impl AnalysisError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::RateLimit(_) => ErrorKind::RateLimit,
            Self::Network(_) => ErrorKind::Network,
            Self::MalformedResponse(_) => ErrorKind::MalformedResponse,
            Self::EmptyQuery => ErrorKind::EmptyQuery,
            Self::Unknown(_) => ErrorKind::Unknown,
        }
    }

    /// Short fixed message safe to show to an end user. Never includes raw
    /// model output or transport detail.
    pub fn user_message(&self) -> &'static str {
        match self.kind() {
            ErrorKind::RateLimit => "The analysis service is busy. Please try again in a few moments.",
            ErrorKind::Network => "Network error. Please check your connection and try again.",
            ErrorKind::MalformedResponse => "Could not complete the analysis. Please try again.",
            ErrorKind::EmptyQuery => "Please provide some input to analyze.",
            ErrorKind::Unknown => "Something went wrong. Please try again.",
        }
    }

    /// Classify a transport or provider error message by its text. Rate
    /// limiting is checked first since quota errors often mention retries
    /// and timeouts too.
    pub fn classify(message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_lowercase();

        if lower.contains("429")
            || lower.contains("quota")
            || lower.contains("rate limit")
            || lower.contains("too many requests")
        {
            return Self::RateLimit(message);
        }

        if lower.contains("network")
            || lower.contains("connection")
            || lower.contains("timeout")
            || lower.contains("timed out")
            || lower.contains("dns")
            || lower.contains("unreachable")
        {
            return Self::Network(message);
        }

        Self::Unknown(message)
    }
}

impl From<reqwest::Error> for AnalysisError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            return Self::Network(err.to_string());
        }
        if err.status() == Some(reqwest::StatusCode::TOO_MANY_REQUESTS) {
            return Self::RateLimit(err.to_string());
        }
        Self::classify(err.to_string())
    }
}
