//! Fluent executor for running a [`Chain`] against caller-supplied variables.

use std::collections::HashMap;

use super::chain::Chain;
use super::error::RunError;
use super::pool::VariablePool;

/// A fluent builder to configure and execute one run of a chain.
///
/// Each run gets its own [`VariablePool`], so a single `Chain` can be shared
/// by any number of concurrent executors.
pub struct ChainExecutor<'a> {
    chain: &'a Chain,
    vars: HashMap<String, String>,
    outputs: Option<Vec<String>>,
}

impl<'a> ChainExecutor<'a> {
    pub fn new(chain: &'a Chain) -> Self {
        Self {
            chain,
            vars: HashMap::new(),
            outputs: None,
        }
    }

    /// Runs `chain` once and returns the `requested` outputs.
    pub async fn execute(
        chain: &Chain,
        initial_inputs: &HashMap<String, String>,
        requested: &[&str],
    ) -> Result<HashMap<String, String>, RunError> {
        ChainExecutor::new(chain)
            .vars(initial_inputs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .outputs(requested.iter().copied())
            .run()
            .await
    }

    /// Sets the initial variables for the run.
    pub fn vars(
        mut self,
        vars: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
    ) -> Self {
        self.vars = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    /// Restricts the result to these step outputs.
    /// If never called, every step output is returned.
    pub fn outputs(mut self, keys: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.outputs = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    /// Executes the steps in order, stopping at the first failure.
    ///
    /// Configuration problems (unknown outputs, inputs shadowing outputs,
    /// missing inputs) are reported before any model is invoked.
    pub async fn run(self) -> Result<HashMap<String, String>, RunError> {
        let requested: Vec<String> = match self.outputs {
            Some(keys) => keys,
            None => self.chain.output_keys().map(str::to_string).collect(),
        };
        if let Some(unknown) = requested.iter().find(|k| !self.chain.produces(k)) {
            return Err(RunError::UnknownOutputKey(unknown.clone()));
        }
        if let Some(shadowed) = self.chain.output_keys().find(|k| self.vars.contains_key(*k)) {
            return Err(RunError::OutputKeyCollision(shadowed.to_string()));
        }
        if let Some(missing) = self
            .chain
            .required_inputs()
            .iter()
            .find(|name| !self.vars.contains_key(*name))
        {
            return Err(RunError::MissingVariable(missing.clone()));
        }

        let mut pool: VariablePool = self.vars.into_iter().collect();
        let total = self.chain.steps().len();

        for (index, step) in self.chain.steps().iter().enumerate() {
            log::debug!(
                "running step '{}' ({}/{})",
                step.output_key(),
                index + 1,
                total
            );
            if let Err(e) = step.run(&mut pool).await {
                log::warn!("step '{}' failed: {}", step.output_key(), e);
                return Err(e);
            }
        }

        pool.project(requested.iter().map(String::as_str))
    }
}
