//! Loads the model provider settings and builds the invoker from them.

use llm::builder::{LLMBackend, LLMBuilder};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use super::utils::default_api_key_env;
use crate::api::{ApiKey, LlmInvoker};

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub provider: ProviderConfig,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ProviderConfig {
    #[serde(default = "default_backend")]
    pub backend: String,
    #[serde(default = "default_model")]
    pub model: String,
    pub api_key_env: Option<String>,
    /// Fallback used when the environment variable is not set.
    pub api_key: Option<ApiKey>,
    pub base_url: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub timeout_secs: Option<u64>,
}

fn default_backend() -> String {
    "openai".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            model: default_model(),
            api_key_env: None,
            api_key: None,
            base_url: None,
            temperature: None,
            max_tokens: None,
            timeout_secs: None,
        }
    }
}

/// `~/.ambiguity-review/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    let home = env::var("HOME").ok()?;
    Some(
        PathBuf::from(home)
            .join(".ambiguity-review")
            .join("config.toml"),
    )
}

impl Settings {
    /// Loads settings from `path`, or from the default location if it exists.
    /// Without either, built-in defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self, String> {
        match path {
            Some(p) => Self::from_file(p),
            None => match default_config_path() {
                Some(p) if p.exists() => Self::from_file(&p),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        Self::from_toml_str(&content)
            .map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
    }

    pub fn from_toml_str(content: &str) -> Result<Self, String> {
        let settings: Settings = toml::from_str(content).map_err(|e| e.to_string())?;
        settings.provider.backend()?;
        Ok(settings)
    }

    /// Replaces backend and model, as given by `--backend provider:model`.
    pub fn override_backend(&mut self, provider: String, model: String) {
        if provider != self.provider.backend {
            // A key configured for another provider would be sent to the wrong service.
            self.provider.api_key_env = None;
            self.provider.api_key = None;
        }
        self.provider.backend = provider;
        self.provider.model = model;
    }
}

impl ProviderConfig {
    pub fn backend(&self) -> Result<LLMBackend, String> {
        LLMBackend::from_str(&self.backend)
            .map_err(|_| format!("Invalid backend '{}'", self.backend))
    }

    /// Environment first, then the settings file.
    ///
    /// `lookup` reads an environment variable; it is a parameter so tests do
    /// not have to mutate the process environment.
    pub fn resolve_api_key(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Option<ApiKey>, String> {
        let backend = self.backend()?;
        let var = self
            .api_key_env
            .clone()
            .or_else(|| default_api_key_env(&backend).map(str::to_string));

        if let Some(key) = var.as_deref().and_then(|v| lookup(v)).filter(|k| !k.is_empty()) {
            return Ok(Some(ApiKey::new(key)));
        }
        if let Some(key) = &self.api_key {
            return Ok(Some(key.clone()));
        }
        match var {
            Some(v) => Err(format!(
                "No API key for backend '{}': set the '{}' environment variable or 'api_key' in the config file",
                self.backend, v
            )),
            None => Ok(None),
        }
    }

    /// Builds the long-lived invoker for this provider.
    pub fn build_invoker(&self, api_key: Option<ApiKey>) -> Result<LlmInvoker, String> {
        let mut builder = LLMBuilder::new()
            .backend(self.backend()?)
            .model(&self.model);

        if let Some(key) = api_key {
            builder = builder.api_key(key.expose());
        }
        if let Some(base_url) = &self.base_url {
            builder = builder.base_url(base_url);
        }
        if let Some(temperature) = self.temperature {
            builder = builder.temperature(temperature);
        }
        if let Some(max_tokens) = self.max_tokens {
            builder = builder.max_tokens(max_tokens);
        }

        let provider = builder.build().map_err(|e| e.to_string())?;
        let invoker = LlmInvoker::new(provider, format!("{}:{}", self.backend, self.model));
        Ok(match self.timeout_secs {
            Some(secs) => invoker.with_timeout(Duration::from_secs(secs)),
            None => invoker,
        })
    }

    /// Resolves the credential from the process environment and builds the invoker.
    pub fn invoker_from_env(&self) -> Result<LlmInvoker, String> {
        let api_key = self.resolve_api_key(|var| env::var(var).ok())?;
        self.build_invoker(api_key)
    }
}
