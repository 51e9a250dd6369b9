//! The requirement ambiguity review, expressed as a one-step chain.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use super::chain::{Chain, ChainStep};
use super::error::RunError;
use super::invoker::ModelInvoker;
use super::pool::VariablePool;
use super::runner::ChainExecutor;
use super::template::PromptTemplate;

const BUSINESS_ANALYST_PROMPT: &str = "\
You are an experienced Business Analyst reviewing requirements before they are \
handed to a delivery team.

Read the requirement statement below and decide whether it contains enough \
information to derive user stories, or whether it is ambiguous. If it is \
ambiguous, explain what is unclear or missing (for example actors, expected \
behaviour, conditions, constraints or acceptance criteria) and list the \
questions you would ask the stakeholder. If it is sufficiently complete, say \
so and briefly explain why.

Statement: {{statement}}";

/// Inbound request body: `{"statement": "..."}`. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AssessmentRequest {
    pub statement: String,
}

/// Outbound result body: `{"review_ambiguity": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssessmentResponse {
    pub review_ambiguity: String,
}

/// Asks a model, playing a business analyst, whether a requirement statement
/// is ambiguous.
///
/// The completion is returned verbatim; no verdict is parsed out of it.
/// Blank statements are forwarded to the model as-is.
pub struct AmbiguityAssessmentPipeline {
    chain: Chain,
}

impl AmbiguityAssessmentPipeline {
    pub const INPUT_KEY: &'static str = "statement";
    pub const OUTPUT_KEY: &'static str = "review_ambiguity";

    /// Builds the pipeline around a long-lived invoker.
    pub fn new(invoker: Arc<dyn ModelInvoker>) -> Result<Self, RunError> {
        let step = ChainStep::new(Self::OUTPUT_KEY, Self::template(), invoker);
        Ok(Self {
            chain: Chain::new(vec![step])?,
        })
    }

    /// The business-analyst review prompt.
    pub fn template() -> PromptTemplate {
        PromptTemplate::new(BUSINESS_ANALYST_PROMPT)
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    /// Renders the prompt that `assess` would send, without calling the model.
    pub fn render_prompt(statement: &str) -> Result<String, RunError> {
        let pool: VariablePool = [(Self::INPUT_KEY, statement)].into_iter().collect();
        Self::template().render(&pool)
    }

    /// Returns the model's assessment of `statement`.
    pub async fn assess(&self, statement: &str) -> Result<String, RunError> {
        let mut out = ChainExecutor::new(&self.chain)
            .vars([(Self::INPUT_KEY, statement)])
            .outputs([Self::OUTPUT_KEY])
            .run()
            .await?;
        out.remove(Self::OUTPUT_KEY)
            .ok_or_else(|| RunError::UnknownOutputKey(Self::OUTPUT_KEY.to_string()))
    }

    /// Mapping form: reads `statement` from `inputs` (other keys are ignored)
    /// and returns `{review_ambiguity: ...}`.
    pub async fn run(
        &self,
        inputs: &HashMap<String, String>,
    ) -> Result<HashMap<String, String>, RunError> {
        let statement = inputs
            .get(Self::INPUT_KEY)
            .ok_or_else(|| RunError::MissingVariable(Self::INPUT_KEY.to_string()))?;
        let review = self.assess(statement).await?;
        Ok(HashMap::from([(Self::OUTPUT_KEY.to_string(), review)]))
    }

    /// Typed request/response form used by front ends.
    pub async fn handle(&self, request: AssessmentRequest) -> Result<AssessmentResponse, RunError> {
        let review_ambiguity = self.assess(&request.statement).await?;
        Ok(AssessmentResponse { review_ambiguity })
    }
}
