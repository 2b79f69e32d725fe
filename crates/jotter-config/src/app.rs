use serde::Deserialize;
use url::Url;

/// Application identity for providers that require caller attribution
///
/// `OpenRouter` expects the calling application to identify itself through
/// referer/title headers; the values live here, the conditional attachment
/// lives in the request path.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppIdentity {
    /// Referer URL identifying the application
    #[serde(default = "default_referer")]
    pub referer: Url,
    /// Human-readable application title
    #[serde(default = "default_title")]
    pub title: String,
}

impl Default for AppIdentity {
    fn default() -> Self {
        Self {
            referer: default_referer(),
            title: default_title(),
        }
    }
}

fn default_referer() -> Url {
    Url::parse("https://jotter.app").expect("valid default referer")
}

fn default_title() -> String {
    "Jotter".to_owned()
}

/// Defaults applied to every chat completion request
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChatDefaults {
    /// Sampling temperature for models that accept one
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// System instruction used when the caller supplies none
    #[serde(default = "default_system_instruction")]
    pub system_instruction: String,
}

impl Default for ChatDefaults {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            system_instruction: default_system_instruction(),
        }
    }
}

fn default_temperature() -> f64 {
    0.7
}

fn default_system_instruction() -> String {
    "You are a helpful assistant.".to_owned()
}
