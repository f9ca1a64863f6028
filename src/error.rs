//! Error types for provider calls and safe expression evaluation.
//!
//! # Error Handling Philosophy
//!
//! Errors are:
//! 1. **Typed**: retry decisions are a pure function over the variant,
//!    never a substring match on a message.
//! 2. **Specific**: each variant carries the context a caller needs to map
//!    it onto an HTTP status and JSON error body.
//! 3. **Recoverable where it matters**: only rate limiting is transient
//!    here; everything else surfaces immediately.
//!
//! | Error | Cause | Handling |
//! |-------|-------|----------|
//! | `RateLimited` | HTTP 429 / quota exhausted | Retried by the invoker up to the attempt budget |
//! | `Unauthenticated` | HTTP 401/403, bad API key | Surfaced immediately |
//! | `Unsupported` | e.g. image sent to a text-only provider | Surfaced immediately |
//! | `Transport` | Connection failure, timeout, 5xx | Surfaced immediately |
//! | `Malformed` | Unparseable response or rejected request | Surfaced immediately |

use thiserror::Error;

/// Result type for provider operations.
pub type Result<T> = std::result::Result<T, ProviderError>;

/// Errors surfaced by LLM provider calls.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider refused the call due to rate limiting or quota.
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// The credentials were rejected.
    #[error("authentication failed: {0}")]
    Unauthenticated(String),

    /// The provider cannot serve this kind of request at all.
    #[error("not supported: {0}")]
    Unsupported(String),

    /// Network-level failure or server-side error.
    #[error("transport error: {0}")]
    Transport(String),

    /// The request was rejected as invalid, or the response could not be
    /// understood.
    #[error("malformed: {0}")]
    Malformed(String),

    /// The caller abandoned the request while it was waiting to retry.
    #[error("request cancelled")]
    Cancelled,

    /// Startup configuration problem (missing key, no provider selected).
    #[error("configuration error: {0}")]
    Config(String),
}

impl ProviderError {
    /// Whether the invoker may retry after this error.
    ///
    /// Only rate limiting is transient: retrying an authentication or
    /// malformed-request failure cannot succeed, and transport failures are
    /// surfaced so the web layer can report them promptly.
    pub fn retryable(&self) -> bool {
        matches!(self, Self::RateLimited(_))
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Transport("request timed out".to_string())
        } else if err.is_connect() {
            ProviderError::Transport(format!("connection failed: {}", err))
        } else {
            ProviderError::Transport(err.to_string())
        }
    }
}

/// Errors from the sandboxed arithmetic evaluator.
///
/// These never cross the crate boundary as hard failures: the solve
/// pipeline recovers them into a textual non-answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// Empty or all-whitespace expression.
    #[error("empty expression")]
    Empty,

    /// A character outside the arithmetic allow-list.
    #[error("unsupported token: {0}")]
    UnsupportedToken(String),

    /// A structurally recognizable but disallowed construct, such as a
    /// comparison or a dangling operator.
    #[error("unsupported operation: {0}")]
    UnsupportedOp(String),

    /// Division by zero, overflow, or a type mismatch (bitwise on floats).
    #[error("arithmetic error: {0}")]
    Arithmetic(String),

    /// Nesting beyond the parser's fixed depth cap.
    #[error("expression nested too deeply")]
    TooDeep,
}
