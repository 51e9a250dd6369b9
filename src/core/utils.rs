use llm::builder::LLMBackend;
use std::fs;
use std::io::{self, Read};
use std::str::FromStr;

/// Split a `provider:model` backend spec, e.g. `openai:gpt-4o-mini`.
pub fn parse_backend(spec: &str) -> Result<(String, String), String> {
    let (provider, model) = spec
        .split_once(':')
        .ok_or("Invalid backend format. Use 'provider:model'")?;
    if provider.trim().is_empty() || model.trim().is_empty() {
        return Err("Invalid backend format. Use 'provider:model'".to_string());
    }
    LLMBackend::from_str(provider.trim()).map_err(|_| format!("Unknown provider: {}", provider))?;
    Ok((provider.trim().to_string(), model.trim().to_string()))
}

/// Environment variable conventionally holding the key for `backend`.
/// `None` for backends that run without a key.
pub fn default_api_key_env(backend: &LLMBackend) -> Option<&'static str> {
    match backend {
        LLMBackend::OpenAI => Some("OPENAI_API_KEY"),
        LLMBackend::Anthropic => Some("ANTHROPIC_API_KEY"),
        LLMBackend::Google => Some("GOOGLE_API_KEY"),
        LLMBackend::Groq => Some("GROQ_API_KEY"),
        LLMBackend::XAI => Some("XAI_API_KEY"),
        LLMBackend::Cohere => Some("COHERE_API_KEY"),
        LLMBackend::DeepSeek => Some("DEEPSEEK_API_KEY"),
        LLMBackend::Mistral => Some("MISTRAL_API_KEY"),
        _ => None,
    }
}

/// Read text from `path`, or from stdin when `path` is `None` or `-`.
pub fn read_input(path: Option<&str>) -> Result<String, String> {
    match path {
        Some(p) if p != "-" => {
            fs::read_to_string(p).map_err(|e| format!("Failed to read {}: {}", p, e))
        }
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| format!("Failed to read stdin: {}", e))?;
            Ok(buf)
        }
    }
}
