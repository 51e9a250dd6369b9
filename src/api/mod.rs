//! Prompt-chain engine and the ambiguity review built on it.

mod chain;
mod error;
mod invoker;
mod llm_bridge;
mod pipeline;
mod pool;
mod runner;
mod template;
#[cfg(test)]
mod testing;

pub use chain::{Chain, ChainStep};
pub use error::RunError;
pub use invoker::{ApiKey, LlmInvoker, ModelInvoker};
pub use pipeline::{AmbiguityAssessmentPipeline, AssessmentRequest, AssessmentResponse};
pub use pool::VariablePool;
pub use runner::ChainExecutor;
pub use template::PromptTemplate;
