//! HTTP dispatch for the OpenAI-compatible chat providers

use std::collections::HashMap;
use std::sync::Arc;

use jotter_config::{AppIdentity, ChatDefaults, Config};
use jotter_core::{ChatMessage, Provider, ToolDeclaration};
use jotter_keys::KeyStore;
use secrecy::{ExposeSecret, SecretString};
use tokio_util::sync::CancellationToken;

use crate::error::ChatError;
use crate::protocol::{ChatCompletionRequest, ChatCompletionResponse};
use crate::request;
use crate::stream::ChatStream;

/// Maximum characters of an error body carried into an error message
const ERROR_BODY_LIMIT: usize = 100;

/// Client for the OpenAI-compatible chat providers
///
/// Holds a shared HTTP client, the injected [`KeyStore`], and the resolved
/// endpoint for every chat provider (config base-URL overrides applied at
/// construction).
pub struct ChatClient {
    http: reqwest::Client,
    keys: Arc<KeyStore>,
    app: AppIdentity,
    defaults: ChatDefaults,
    endpoints: HashMap<Provider, String>,
}

impl ChatClient {
    /// Build a client from configuration and an injected key store
    pub fn new(config: &Config, keys: Arc<KeyStore>) -> Self {
        let endpoints = request::CHAT_ENDPOINTS
            .iter()
            .map(|&(provider, default_url)| {
                let url = config
                    .provider(provider)
                    .and_then(|settings| settings.base_url.as_ref())
                    .map_or_else(
                        || default_url.to_owned(),
                        |base| format!("{}/chat/completions", base.as_str().trim_end_matches('/')),
                    );
                (provider, url)
            })
            .collect();

        Self {
            http: reqwest::Client::new(),
            keys,
            app: config.app.clone(),
            defaults: config.chat.clone(),
            endpoints,
        }
    }

    /// The key store backing this client
    pub fn keys(&self) -> &Arc<KeyStore> {
        &self.keys
    }

    /// Open a streaming chat completion
    ///
    /// Validates the key before any network I/O, issues the request, and
    /// hands the accepted byte stream to the decoder. The cancellation
    /// token is raced against the request and every subsequent read.
    pub async fn stream_chat(
        &self,
        provider: Provider,
        model: &str,
        messages: &[ChatMessage],
        system_instruction: Option<&str>,
        tools: Option<&[ToolDeclaration]>,
        cancel: CancellationToken,
    ) -> Result<ChatStream, ChatError> {
        let (key, url) = self.prepare(provider)?;
        let body = request::build_body(model, messages, system_instruction, tools, &self.defaults, true);

        let response = self.send(provider, &url, &key, &body, &cancel).await?;

        Ok(ChatStream::new(provider, Box::pin(response.bytes_stream()), cancel))
    }

    /// Single-shot (non-streaming) chat completion
    ///
    /// Returns the first choice's message content; an absent content field
    /// reads as empty.
    pub async fn complete(
        &self,
        provider: Provider,
        model: &str,
        messages: &[ChatMessage],
        system_instruction: Option<&str>,
        tools: Option<&[ToolDeclaration]>,
        cancel: CancellationToken,
    ) -> Result<String, ChatError> {
        let (key, url) = self.prepare(provider)?;
        let body = request::build_body(model, messages, system_instruction, tools, &self.defaults, false);

        let response = self.send(provider, &url, &key, &body, &cancel).await?;

        let parsed: ChatCompletionResponse = response.json().await.map_err(|e| ChatError::Decode {
            provider,
            message: e.to_string(),
        })?;

        Ok(parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default())
    }

    /// Resolve the endpoint and key for a provider
    fn prepare(&self, provider: Provider) -> Result<(SecretString, String), ChatError> {
        let url = self.endpoints.get(&provider).cloned().ok_or(ChatError::Unsupported {
            provider,
            operation: "chat completions",
        })?;
        let key = self.keys.key(provider).ok_or(ChatError::MissingKey { provider })?;
        Ok((key, url))
    }

    /// Issue the HTTP request and vet the response status
    async fn send(
        &self,
        provider: Provider,
        url: &str,
        key: &SecretString,
        body: &ChatCompletionRequest,
        cancel: &CancellationToken,
    ) -> Result<reqwest::Response, ChatError> {
        let mut builder = self.http.post(url).json(body).bearer_auth(key.expose_secret());
        for (name, value) in request::identity_headers(provider, &self.app) {
            builder = builder.header(name, value);
        }

        let sent = tokio::select! {
            () = cancel.cancelled() => return Err(ChatError::Cancelled),
            result = builder.send() => result,
        };

        let response = match sent {
            Ok(response) => response,
            Err(e) => {
                let message = e.to_string();
                tracing::error!(provider = %provider, error = %message, "upstream request failed");
                self.keys.report_failure(provider, Some(key), &message);
                return Err(ChatError::Transport { provider, message });
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            let snippet = truncate(&body_text, ERROR_BODY_LIMIT);
            tracing::warn!(provider = %provider, status = %status, "upstream returned error");
            self.keys
                .report_failure(provider, Some(key), &format!("{status}: {snippet}"));
            return Err(ChatError::Api {
                provider,
                status: status.as_u16(),
                body: snippet,
            });
        }

        self.keys.report_success(provider);
        Ok(response)
    }
}

/// Truncate to a maximum number of characters
fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
