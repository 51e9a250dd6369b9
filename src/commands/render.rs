use crate::api::AmbiguityAssessmentPipeline;

use super::statement_or_stdin;

/// Render the review prompt for a statement and print it to stdout.
pub fn run(statement: Option<&str>) -> Result<(), String> {
    let statement = statement_or_stdin(statement)?;
    let rendered =
        AmbiguityAssessmentPipeline::render_prompt(&statement).map_err(|e| e.to_string())?;
    println!("{}", rendered);
    Ok(())
}
