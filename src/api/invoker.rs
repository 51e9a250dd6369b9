//! The boundary between a chain and the remote completion service.

use async_trait::async_trait;
use llm::chat::ChatMessage;
use llm::error::LLMError;
use llm::LLMProvider;
use std::fmt;
use std::future::Future;
use std::time::Duration;

use super::error::RunError;
use super::llm_bridge::classify;

/// Turns a rendered prompt into a completion.
///
/// This is the only place a chain touches the outside world. Implementations
/// must not retry on their own; callers decide retry policy from
/// [`RunError::is_retryable`].
#[async_trait]
pub trait ModelInvoker: Send + Sync {
    /// Returns a non-empty completion for `prompt`.
    async fn invoke(&self, prompt: &str) -> Result<String, RunError>;
}

/// An opaque model-service credential.
#[derive(Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wraps a raw key string.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the raw key, for handing to a provider builder.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// A [`ModelInvoker`] backed by any provider from the `llm` crate.
///
/// The provider (and the credential it was built with) lives as long as the
/// invoker, so one instance serves every request of the process.
pub struct LlmInvoker {
    provider: Box<dyn LLMProvider>,
    label: String,
    timeout: Option<Duration>,
}

impl LlmInvoker {
    /// Wraps an already-built provider. `label` identifies it in logs.
    pub fn new(provider: Box<dyn LLMProvider>, label: impl Into<String>) -> Self {
        Self {
            provider,
            label: label.into(),
            timeout: None,
        }
    }

    /// Bounds each call; an expired call fails as [`RunError::UpstreamUnavailable`].
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns the `backend:model` label used in logs and errors.
    pub fn label(&self) -> &str {
        &self.label
    }
}

#[async_trait]
impl ModelInvoker for LlmInvoker {
    async fn invoke(&self, prompt: &str) -> Result<String, RunError> {
        log::debug!("sending {} byte prompt to {}", prompt.len(), self.label);

        let messages = vec![ChatMessage::user().content(prompt).build()];
        let call = async {
            let response = self.provider.chat(&messages).await?;
            Ok::<_, LLMError>(response.text())
        };
        await_completion(call, self.timeout, &self.label).await
    }
}

/// Awaits a provider call, applying the timeout, error classification and
/// the non-empty completion rule.
async fn await_completion<F>(
    call: F,
    timeout: Option<Duration>,
    label: &str,
) -> Result<String, RunError>
where
    F: Future<Output = Result<Option<String>, LLMError>>,
{
    let text = match timeout {
        Some(limit) => tokio::time::timeout(limit, call).await.map_err(|_| {
            RunError::UpstreamUnavailable(format!("no response from {} within {:?}", label, limit))
        })?,
        None => call.await,
    }
    .map_err(classify)?;

    match text {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(RunError::InvalidResponse(format!(
            "{} returned an empty completion",
            label
        ))),
    }
}
