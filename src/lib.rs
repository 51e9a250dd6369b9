pub mod api;
pub mod cli;
pub mod commands;
pub mod core;

pub use api::{
    AmbiguityAssessmentPipeline, Chain, ChainExecutor, ChainStep, ModelInvoker, PromptTemplate,
    RunError, VariablePool,
};
