use crate::api::AssessmentRequest;
use crate::core::config::Settings;
use crate::core::utils::read_input;
use serde_json::{json, Value};

use super::build_pipeline;

/// Answer a JSON request body with `{"result": ...}` or `{"error": ...}`.
pub async fn run(settings: &Settings, file: Option<&str>) -> Result<(), String> {
    match respond(settings, file).await {
        Ok(body) => {
            println!("{}", body);
            Ok(())
        }
        Err(message) => {
            println!("{}", error_body(&message));
            Err(message)
        }
    }
}

async fn respond(settings: &Settings, file: Option<&str>) -> Result<Value, String> {
    let body = read_input(file)?;
    let request = parse_request(&body)?;
    let pipeline = build_pipeline(settings)?;

    let response = pipeline.handle(request).await.map_err(|e| {
        log::warn!("request failed: {}", e);
        e.public_message()
    })?;
    Ok(json!({ "result": response }))
}

fn parse_request(body: &str) -> Result<AssessmentRequest, String> {
    serde_json::from_str(body).map_err(|e| format!("Invalid request body: {}", e))
}

fn error_body(message: &str) -> Value {
    json!({ "error": message })
}
