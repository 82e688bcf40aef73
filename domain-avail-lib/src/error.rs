//! Error handling for domain lookups.
//!
//! Lookup errors never abort a batch: the classifier turns every error into a
//! verdict. The enum still keeps enough structure for logging and for telling
//! an affirmative "no such record" apart from a generic failure.

use std::fmt;
use std::time::Duration;

/// Phrases a registry uses to say it holds no record for a domain.
pub(crate) const NO_MATCH_PATTERNS: [&str; 3] = ["no match", "not found", "no entries found"];

/// Main error type for lookup and configuration operations.
#[derive(Debug, Clone)]
pub enum DomainAvailError {
    /// WHOIS lookup failed or the registry reported a problem.
    ///
    /// The message carries the registry text when there is one, which is
    /// what [`DomainAvailError::indicates_available`] inspects.
    WhoisError { domain: String, message: String },

    /// Lookup did not complete in time
    Timeout {
        operation: String,
        duration: Duration,
    },

    /// Registry refused to answer because of request volume
    RateLimited { service: String, message: String },

    /// Configuration errors (invalid settings, unparsable files)
    ConfigError { message: String },

    /// File I/O errors when reading configuration
    FileError { path: String, message: String },

    /// Generic internal errors that don't fit other categories
    Internal { message: String },
}

impl DomainAvailError {
    /// Create a new WHOIS error.
    pub fn whois<D: Into<String>, M: Into<String>>(domain: D, message: M) -> Self {
        Self::WhoisError {
            domain: domain.into(),
            message: message.into(),
        }
    }

    /// Create a new timeout error.
    pub fn timeout<O: Into<String>>(operation: O, duration: Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    /// Create a new rate limit error.
    pub fn rate_limited<S: Into<String>, M: Into<String>>(service: S, message: M) -> Self {
        Self::RateLimited {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Create a new configuration error.
    pub fn config<M: Into<String>>(message: M) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a new file error.
    pub fn file_error<P: Into<String>, M: Into<String>>(path: P, message: M) -> Self {
        Self::FileError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a new internal error.
    pub fn internal<M: Into<String>>(message: M) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Check if this error means the registry has no record for the domain.
    ///
    /// Matches the lowercase message against the registry "no match" phrases.
    /// Only WHOIS errors carry registry text; everything else is a failure.
    pub fn indicates_available(&self) -> bool {
        match self {
            Self::WhoisError { message, .. } => {
                let msg = message.to_lowercase();
                NO_MATCH_PATTERNS.iter().any(|pattern| msg.contains(pattern))
            }
            _ => false,
        }
    }

    /// Check if this error is likely transient.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::RateLimited { .. })
    }
}

impl fmt::Display for DomainAvailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WhoisError { domain, message } => {
                write!(f, "WHOIS error for '{}': {}", domain, message)
            }
            Self::Timeout {
                operation,
                duration,
            } => {
                write!(f, "Timeout after {:?} during: {}", duration, operation)
            }
            Self::RateLimited { service, message } => {
                write!(f, "Rate limited by {}: {}", service, message)
            }
            Self::ConfigError { message } => {
                write!(f, "Configuration error: {}", message)
            }
            Self::FileError { path, message } => {
                write!(f, "File error at '{}': {}", path, message)
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {}", message)
            }
        }
    }
}

impl std::error::Error for DomainAvailError {}

impl From<toml::de::Error> for DomainAvailError {
    fn from(err: toml::de::Error) -> Self {
        Self::ConfigError {
            message: format!("Failed to parse TOML configuration: {}", err),
        }
    }
}
