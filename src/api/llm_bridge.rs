//! Bridge between the `llm` crate's errors and [`RunError`].

use llm::error::LLMError;
use regex::Regex;
use std::sync::LazyLock;

use super::error::RunError;

/// `error status: 429`, `status code 503`, `HTTP 401`, ...
static HTTP_STATUS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:status(?:\s+code)?|http)\s*:?\s*([1-5]\d{2})\b")
        .expect("status pattern is a valid regex")
});

/// Sorts an `llm` backend failure into the retryable/fatal taxonomy.
///
/// Providers report non-2xx answers as response-format errors whose message
/// carries the HTTP status, so the status decides before the variant does.
pub(crate) fn classify(err: LLMError) -> RunError {
    match err {
        LLMError::AuthError { .. } => RunError::Authentication(err.to_string()),
        LLMError::ResponseFormatError { ref message, .. } => {
            let status = http_status(message);
            let text = err.to_string();
            status
                .map(|code| classify_status(code, text.clone()))
                .unwrap_or(RunError::InvalidResponse(text))
        }
        LLMError::JsonError { .. } | LLMError::InvalidRequest { .. } => {
            RunError::InvalidResponse(err.to_string())
        }
        _ => classify_message(err.to_string()),
    }
}

fn http_status(message: &str) -> Option<u16> {
    HTTP_STATUS
        .captures(message)
        .and_then(|caps| caps[1].parse().ok())
}

fn classify_status(code: u16, message: String) -> RunError {
    match code {
        429 => RunError::RateLimited(message),
        401 | 403 => RunError::Authentication(message),
        408 | 500..=599 => RunError::UpstreamUnavailable(message),
        _ => RunError::InvalidResponse(message),
    }
}

fn classify_message(message: String) -> RunError {
    if let Some(code) = http_status(&message) {
        return classify_status(code, message);
    }
    let lower = message.to_ascii_lowercase();
    if lower.contains("rate limit") || lower.contains("too many requests") {
        RunError::RateLimited(message)
    } else if lower.contains("unauthorized") || lower.contains("invalid api key") {
        RunError::Authentication(message)
    } else {
        RunError::UpstreamUnavailable(message)
    }
}
