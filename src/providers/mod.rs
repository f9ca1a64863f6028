//! Concrete provider clients.

pub mod gemini;
pub mod mock;
pub mod openai;

pub use gemini::GeminiProvider;
pub use mock::MockProvider;
pub use openai::OpenAiProvider;

use reqwest::StatusCode;

use crate::error::ProviderError;

/// Map an unsuccessful HTTP status to a typed provider error.
///
/// This is the single classification point for remote failures — a pure
/// function over the status code, so the retry decision upstream never has
/// to sniff message text.
pub(crate) fn error_for_status(
    provider: &str,
    status: StatusCode,
    body: &str,
) -> ProviderError {
    let detail = format!("{} returned {}: {}", provider, status.as_u16(), snippet(body));
    match status {
        StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimited(detail),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ProviderError::Unauthenticated(detail)
        }
        s if s.is_client_error() => ProviderError::Malformed(detail),
        _ => ProviderError::Transport(detail),
    }
}

/// First part of a response body, for error messages and logs.
pub(crate) fn snippet(body: &str) -> &str {
    match body.char_indices().nth(200) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
