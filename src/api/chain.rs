//! Chain steps and the ordered chains built from them.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use super::error::RunError;
use super::invoker::ModelInvoker;
use super::pool::VariablePool;
use super::template::PromptTemplate;

/// One prompt sent to one model, with its completion stored under `output_key`.
#[derive(Clone)]
pub struct ChainStep {
    output_key: String,
    template: PromptTemplate,
    invoker: Arc<dyn ModelInvoker>,
}

impl ChainStep {
    /// Creates a step that renders `template` and stores the completion under `output_key`.
    pub fn new(
        output_key: impl Into<String>,
        template: PromptTemplate,
        invoker: Arc<dyn ModelInvoker>,
    ) -> Self {
        Self {
            output_key: output_key.into(),
            template,
            invoker,
        }
    }

    /// Name the completion is bound to.
    pub fn output_key(&self) -> &str {
        &self.output_key
    }

    /// Variables this step reads, i.e. the template's placeholders.
    pub fn input_variables(&self) -> &[String] {
        self.template.placeholders()
    }

    /// The prompt this step renders.
    pub fn template(&self) -> &PromptTemplate {
        &self.template
    }

    /// Renders the prompt, invokes the model once and binds the completion.
    ///
    /// On failure the pool is left untouched.
    pub async fn run(&self, pool: &mut VariablePool) -> Result<String, RunError> {
        if pool.contains(&self.output_key) {
            return Err(RunError::OutputKeyCollision(self.output_key.clone()));
        }
        let prompt = self.template.render(pool)?;
        let output = self.invoker.invoke(&prompt).await?;
        pool.insert_new(self.output_key.clone(), output.clone())?;
        Ok(output)
    }
}

impl fmt::Debug for ChainStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainStep")
            .field("output_key", &self.output_key)
            .field("inputs", &self.template.placeholders())
            .finish_non_exhaustive()
    }
}

/// An ordered, immutable sequence of steps.
#[derive(Debug, Clone)]
pub struct Chain {
    steps: Vec<ChainStep>,
    required_inputs: Vec<String>,
}

impl Chain {
    /// Validates and freezes `steps`.
    ///
    /// Fails with [`RunError::OutputKeyCollision`] when two steps share an
    /// output key.
    pub fn new(steps: Vec<ChainStep>) -> Result<Self, RunError> {
        let mut produced: HashSet<&str> = HashSet::new();
        let mut required_inputs: Vec<String> = Vec::new();

        for step in &steps {
            for input in step.input_variables() {
                if !produced.contains(input.as_str()) && !required_inputs.contains(input) {
                    required_inputs.push(input.clone());
                }
            }
            if !produced.insert(step.output_key()) {
                return Err(RunError::OutputKeyCollision(step.output_key().to_string()));
            }
        }

        Ok(Self {
            steps,
            required_inputs,
        })
    }

    /// Steps in execution order.
    pub fn steps(&self) -> &[ChainStep] {
        &self.steps
    }

    /// Inputs no earlier step produces; the caller must supply these.
    pub fn required_inputs(&self) -> &[String] {
        &self.required_inputs
    }

    /// Output keys in execution order.
    pub fn output_keys(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(ChainStep::output_key)
    }

    /// Whether some step binds `key`.
    pub fn produces(&self, key: &str) -> bool {
        self.output_keys().any(|k| k == key)
    }
}
