//! Error types for the library API.

use thiserror::Error;

/// Every way a chain run can fail.
///
/// The first failure aborts the run and is returned unchanged; nothing in the
/// library retries or suppresses these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    /// A template placeholder (or a required chain input) has no bound value.
    #[error("Missing variable '{0}'")]
    MissingVariable(String),

    /// A requested output is not produced by any step of the chain.
    #[error("Output '{0}' is not produced by any step of the chain")]
    UnknownOutputKey(String),

    /// Two steps, or a step and the initial inputs, claim the same variable name.
    #[error("Variable '{0}' is already bound; outputs may not overwrite existing variables")]
    OutputKeyCollision(String),

    /// The model service rejected or never received a credential.
    #[error("Authentication with the model service failed: {0}")]
    Authentication(String),

    /// The model service asked us to back off.
    #[error("Rate limited by the model service: {0}")]
    RateLimited(String),

    /// Network failure, timeout or server-side error at the model service.
    #[error("Model service unavailable: {0}")]
    UpstreamUnavailable(String),

    /// The model service answered with something that is not a usable completion.
    #[error("Invalid response from the model service: {0}")]
    InvalidResponse(String),
}

impl RunError {
    /// Whether the same request may succeed if simply tried again later.
    pub fn is_retryable(&self) -> bool {
        matches!(self, RunError::RateLimited(_) | RunError::UpstreamUnavailable(_))
    }

    /// A message safe to hand to an end user.
    ///
    /// Unlike `Display`, this never includes provider payloads, which may echo
    /// request details back.
    pub fn public_message(&self) -> String {
        match self {
            RunError::MissingVariable(name) => format!("Missing required input '{}'.", name),
            RunError::UnknownOutputKey(_) | RunError::OutputKeyCollision(_) => {
                "The analysis pipeline is misconfigured.".to_string()
            }
            RunError::Authentication(_) => {
                "The language model service rejected the configured credential.".to_string()
            }
            RunError::RateLimited(_) => {
                "The language model service is rate limiting requests; try again later."
                    .to_string()
            }
            RunError::UpstreamUnavailable(_) => {
                "The language model service is currently unavailable.".to_string()
            }
            RunError::InvalidResponse(_) => {
                "The language model service returned an unusable response.".to_string()
            }
        }
    }
}
