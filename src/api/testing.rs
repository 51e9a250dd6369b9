//! Scripted invokers for unit tests.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::error::RunError;
use super::invoker::ModelInvoker;

/// Replies with a fixed result and records every prompt it receives.
pub(crate) struct ScriptedInvoker {
    name: &'static str,
    reply: Result<String, RunError>,
    prompts: Mutex<Vec<String>>,
    order: Option<Arc<Mutex<Vec<&'static str>>>>,
}

impl ScriptedInvoker {
    pub(crate) fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self::new("stub", Ok(reply.to_string()), None))
    }

    pub(crate) fn failing(err: RunError) -> Arc<Self> {
        Arc::new(Self::new("stub", Err(err), None))
    }

    pub(crate) fn new(
        name: &'static str,
        reply: Result<String, RunError>,
        order: Option<Arc<Mutex<Vec<&'static str>>>>,
    ) -> Self {
        Self {
            name,
            reply,
            prompts: Mutex::new(Vec::new()),
            order,
        }
    }

    pub(crate) fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub(crate) fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl ModelInvoker for ScriptedInvoker {
    async fn invoke(&self, prompt: &str) -> Result<String, RunError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if let Some(order) = &self.order {
            order.lock().unwrap().push(self.name);
        }
        self.reply.clone()
    }
}
