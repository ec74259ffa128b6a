//! Explainer configuration.
//!
//! The extension runs with the built-in defaults. The native harness can
//! override the endpoint and model from the environment (see
//! [`ExplainerConfig::from_env`]), which is also how tests point the client
//! at a local mock server.

use serde::Serialize;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

pub const ENV_API_BASE: &str = "EXPLAINER_API_BASE";
pub const ENV_MODEL: &str = "EXPLAINER_MODEL";
pub const ENV_OPEN_POPUP_ON_INSTALL: &str = "EXPLAINER_OPEN_POPUP_ON_INSTALL";

/// Errors produced while reading configuration values.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Fixed sampling parameters sent with every `generateContent` call.
///
/// Serialized as the provider's `generationConfig` object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationParams {
    pub temperature: f64,
    pub top_k: u32,
    pub top_p: f64,
    pub max_output_tokens: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self { temperature: 0.7, top_k: 40, top_p: 0.95, max_output_tokens: 1024 }
    }
}

/// What the background worker does when the extension is first installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallPolicy {
    /// Open the configuration popup right after installation.
    pub open_popup_on_install: bool,
}

impl Default for InstallPolicy {
    fn default() -> Self {
        Self { open_popup_on_install: true }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExplainerConfig {
    /// Provider API root, without trailing slash.
    pub api_base: String,
    pub model: String,
    pub generation: GenerationParams,
    pub install: InstallPolicy,
}

impl Default for ExplainerConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_owned(),
            model: DEFAULT_MODEL.to_owned(),
            generation: GenerationParams::default(),
            install: InstallPolicy::default(),
        }
    }
}

impl ExplainerConfig {
    /// Build config from the process environment.
    ///
    /// Optional:
    /// - `EXPLAINER_API_BASE`: provider API root (default Gemini `v1beta`)
    /// - `EXPLAINER_MODEL`: model name (default `gemini-1.5-flash`)
    /// - `EXPLAINER_OPEN_POPUP_ON_INSTALL`: `true`/`false` (default `true`)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for blank or unparseable values.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for blank or unparseable values.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_API_BASE) {
            config.api_base = non_blank(ENV_API_BASE, &raw)?
                .trim_end_matches('/')
                .to_owned();
        }
        if let Some(raw) = lookup(ENV_MODEL) {
            config.model = non_blank(ENV_MODEL, &raw)?.to_owned();
        }
        if let Some(raw) = lookup(ENV_OPEN_POPUP_ON_INSTALL) {
            config.install.open_popup_on_install = parse_bool(ENV_OPEN_POPUP_ON_INSTALL, &raw)?;
        }

        Ok(config)
    }

    /// Full `generateContent` URL for the configured model.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }
}

fn non_blank<'a>(key: &'static str, raw: &'a str) -> Result<&'a str, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid { key, value: raw.to_owned() });
    }
    Ok(trimmed)
}

fn parse_bool(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid { key, value: raw.to_owned() }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
