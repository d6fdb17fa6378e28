use serde::{Deserialize, Serialize};

/// Unified error type for all registrar operations.
///
/// Each variant includes a `provider` field identifying which registrar produced the error,
/// plus variant-specific context. All variants are serializable for structured error reporting.
///
/// # Transport Errors
///
/// The following variants mean the request never produced a usable response:
/// - [`NetworkError`](Self::NetworkError) — network connectivity issues
/// - [`Timeout`](Self::Timeout) — request timed out
/// - [`HttpStatus`](Self::HttpStatus) — the registrar answered with a non-2xx status
///
/// They are surfaced to the caller as-is. The client never retries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    NetworkError {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The registrar endpoint answered with a non-success HTTP status.
    ///
    /// The registrar reports its own API errors inside a `200 OK` body, so this only
    /// fires for gateway or server failures.
    HttpStatus {
        /// Provider that produced the error.
        provider: String,
        /// HTTP status code.
        status: u16,
        /// Response body, if one could be read.
        raw_message: Option<String>,
    },

    /// A request parameter is invalid (e.g., a domain without a dot).
    InvalidParameter {
        /// Provider that produced the error.
        provider: String,
        /// Name of the invalid parameter.
        param: String,
        /// Description of what's wrong.
        detail: String,
    },
}

impl ProviderError {
    /// Whether the error happened on the wire rather than in the caller's input.
    ///
    /// Callers use this for log levels: transport failures are `error`, input problems `warn`.
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::NetworkError { .. } | Self::Timeout { .. } | Self::HttpStatus { .. }
        )
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { provider, detail } => {
                write!(f, "[{provider}] Network error: {detail}")
            }
            Self::Timeout { provider, detail } => {
                write!(f, "[{provider}] Request timeout: {detail}")
            }
            Self::HttpStatus {
                provider, status, ..
            } => {
                write!(f, "[{provider}] HTTP {status}")
            }
            Self::InvalidParameter {
                provider,
                param,
                detail,
            } => {
                write!(f, "[{provider}] Invalid parameter '{param}': {detail}")
            }
        }
    }
}

impl std::error::Error for ProviderError {}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;
