use crate::api::AmbiguityAssessmentPipeline;
use crate::cli::Cmd;
use crate::core::config::Settings;
use crate::core::utils::read_input;
use std::sync::Arc;

pub mod assess;
pub mod render;
pub mod request;

/// Dispatches the parsed command to the appropriate handler.
pub async fn dispatch(command: Cmd, settings: &Settings) -> Result<(), String> {
    match command {
        Cmd::Assess { statement } => assess::run(settings, statement.as_deref()).await,
        Cmd::Request { file } => request::run(settings, file.as_deref()).await,
        Cmd::Render { statement } => render::run(statement.as_deref()),
    }
}

/// Build the pipeline with a provider resolved from the settings and environment.
fn build_pipeline(settings: &Settings) -> Result<AmbiguityAssessmentPipeline, String> {
    let invoker = settings.provider.invoker_from_env()?;
    log::info!("using model backend {}", invoker.label());
    AmbiguityAssessmentPipeline::new(Arc::new(invoker)).map_err(|e| e.to_string())
}

/// The statement argument, or stdin without its trailing newline.
fn statement_or_stdin(statement: Option<&str>) -> Result<String, String> {
    match statement {
        Some(s) => Ok(s.to_string()),
        None => {
            let input = read_input(None)?;
            Ok(strip_line_ending(&input).to_string())
        }
    }
}

fn strip_line_ending(input: &str) -> &str {
    input
        .strip_suffix("\r\n")
        .or_else(|| input.strip_suffix('\n'))
        .unwrap_or(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_one_line_ending_only() {
        assert_eq!(strip_line_ending("text\n"), "text");
        assert_eq!(strip_line_ending("text\r\n"), "text");
        assert_eq!(strip_line_ending("text\n\n"), "text\n");
        assert_eq!(strip_line_ending("  "), "  ");
    }
}
