//! Configuration for the jotter gateway
//!
//! Loads a TOML file, expands `{{ env.VAR }}` placeholders, and validates
//! the result. Key material is held in [`secrecy::SecretString`] and never
//! logged or re-serialized.

mod app;
mod env;
mod loader;
mod provider;

use indexmap::IndexMap;
use jotter_core::Provider;
use serde::Deserialize;

pub use app::{AppIdentity, ChatDefaults};
pub use provider::ProviderSettings;

/// Top-level gateway configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Provider settings keyed by provider name
    #[serde(default)]
    pub providers: IndexMap<Provider, ProviderSettings>,
    /// Application identity sent to providers that require it
    #[serde(default)]
    pub app: AppIdentity,
    /// Defaults applied to chat completion requests
    #[serde(default)]
    pub chat: ChatDefaults,
}

impl Config {
    /// Settings for a single provider, if configured
    pub fn provider(&self, provider: Provider) -> Option<&ProviderSettings> {
        self.providers.get(&provider)
    }
}
