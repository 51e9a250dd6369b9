//! Defines the command-line interface structure using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "ambiguity-review",
    version,
    about = "Ask a language model whether a requirement statement is ambiguous"
)]
pub struct Cli {
    /// Settings file (defaults to ~/.ambiguity-review/config.toml when present)
    #[arg(long, global = true, env = "AMBIGUITY_REVIEW_CONFIG")]
    pub config: Option<PathBuf>,
    /// LLM backend to use, e.g. 'openai:gpt-4o-mini'; overrides the settings file
    #[arg(long, global = true)]
    pub backend: Option<String>,
    #[command(subcommand)]
    pub command: Cmd,
}

#[derive(Subcommand)]
pub enum Cmd {
    /// Assess a requirement statement and print the review
    Assess {
        /// The statement to review; read from stdin when omitted
        statement: Option<String>,
    },
    /// Answer a JSON request body ({"statement": ...}) with a JSON response
    Request {
        /// File holding the request body; stdin when omitted or '-'
        file: Option<String>,
    },
    /// Print the prompt that would be sent, without calling the model
    Render {
        /// The statement to embed; read from stdin when omitted
        statement: Option<String>,
    },
}
