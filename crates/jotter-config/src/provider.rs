use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Configuration for a single provider
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderSettings {
    /// API key for authentication
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Base URL override (endpoint paths are appended by the client)
    #[serde(default)]
    pub base_url: Option<Url>,
}
