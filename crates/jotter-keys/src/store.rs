use std::collections::HashMap;

use dashmap::DashMap;
use jotter_config::Config;
use jotter_core::Provider;
use secrecy::{ExposeSecret, SecretString};

/// Advisory health state for a provider
///
/// Updated by success/failure reports from any call site; reads are
/// last-writer-wins and only ever affect what callers display or whether
/// they short-circuit a dispatch, never the correctness of an in-flight
/// request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderHealth {
    /// Whether the last reported outcome was a success
    pub healthy: bool,
    /// Human-readable status string
    pub status: String,
}

impl Default for ProviderHealth {
    fn default() -> Self {
        Self {
            healthy: true,
            status: "ok".to_owned(),
        }
    }
}

/// Resolves provider API keys and tracks per-provider health
pub struct KeyStore {
    keys: HashMap<Provider, SecretString>,
    health: DashMap<Provider, ProviderHealth>,
}

impl KeyStore {
    /// Build a store from configured provider keys
    pub fn from_config(config: &Config) -> Self {
        let keys = config
            .providers
            .iter()
            .filter_map(|(provider, settings)| {
                settings.api_key.as_ref().map(|key| (*provider, key.clone()))
            })
            .collect();

        Self {
            keys,
            health: DashMap::new(),
        }
    }

    /// Build a store from an explicit key map
    pub fn new(keys: HashMap<Provider, SecretString>) -> Self {
        Self {
            keys,
            health: DashMap::new(),
        }
    }

    /// The configured key for a provider, if any
    pub fn key(&self, provider: Provider) -> Option<SecretString> {
        self.keys.get(&provider).cloned()
    }

    /// Record a successful call, clearing any failure state
    pub fn report_success(&self, provider: Provider) {
        self.health.insert(provider, ProviderHealth::default());
    }

    /// Record a failed call
    ///
    /// The stored status embeds a redacted key suffix and the error text;
    /// full key material is never stored or logged.
    pub fn report_failure(&self, provider: Provider, key: Option<&SecretString>, error: &str) {
        let key_label = key.map_or_else(|| "no key".to_owned(), |k| redact(k.expose_secret()));
        let status = format!("key {key_label} failed: {error}");

        tracing::warn!(provider = %provider, key = %key_label, error, "provider call failed");
        self.health.insert(
            provider,
            ProviderHealth {
                healthy: false,
                status,
            },
        );
    }

    /// Current health for a provider; unreported providers read healthy
    pub fn health(&self, provider: Provider) -> ProviderHealth {
        self.health
            .get(&provider)
            .map_or_else(ProviderHealth::default, |entry| entry.value().clone())
    }

    /// Whether the last reported outcome for a provider was a success
    pub fn is_healthy(&self, provider: Provider) -> bool {
        self.health(provider).healthy
    }
}

/// Keep only the last four characters of a key for display
fn redact(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let suffix: String = chars[chars.len().saturating_sub(4)..].iter().collect();
    format!("…{suffix}")
}
