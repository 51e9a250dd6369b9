use crate::core::config::Settings;
use console::style;
use spinners::{Spinner, Spinners};

use super::{build_pipeline, statement_or_stdin};

/// Assess a statement with the configured LLM and print the review.
pub async fn run(settings: &Settings, statement: Option<&str>) -> Result<(), String> {
    let statement = statement_or_stdin(statement)?;
    let pipeline = build_pipeline(settings)?;

    let mut sp = Spinner::new(Spinners::Dots9, "Waiting for LLM response...".into());
    let result = pipeline.assess(&statement).await;
    match result {
        Ok(review) => {
            sp.stop_with_message("✔ Response received.".into());
            println!("\n{}", review);
            Ok(())
        }
        Err(e) => {
            sp.stop_with_message(format!("{} Request failed.", style("✘").red()));
            log::warn!("assessment failed: {}", e);
            let hint = if e.is_retryable() { " (retryable)" } else { "" };
            Err(format!("{}{}", e.public_message(), hint))
        }
    }
}
