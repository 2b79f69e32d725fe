//! Single-shot media operations for jotter
//!
//! Vision analysis and image generation against the Gemini
//! `generateContent` API. Gemini is the only implemented media backend;
//! every other provider gets an explicit [`MediaError::Unsupported`]
//! rather than a silent no-op.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod error;
pub mod gemini;

use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use jotter_config::Config;
use jotter_core::Provider;
use jotter_keys::KeyStore;
use secrecy::{ExposeSecret, SecretString};

pub use error::MediaError;

use gemini::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, InlineData, Part};

/// Default Gemini API base URL
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Maximum characters of an error body carried into an error message
const ERROR_BODY_LIMIT: usize = 100;

/// A generated image plus any accompanying caption text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    /// `data:<mime>;base64,<payload>` URI, ready for direct rendering
    pub data_uri: String,
    /// Caption text the model emitted alongside the image
    pub caption: Option<String>,
}

/// Client for single-shot media operations
pub struct MediaClient {
    http: reqwest::Client,
    keys: Arc<KeyStore>,
    base_url: String,
}

impl MediaClient {
    /// Build a client from configuration and an injected key store
    pub fn new(config: &Config, keys: Arc<KeyStore>) -> Self {
        let base_url = config
            .provider(Provider::Gemini)
            .and_then(|settings| settings.base_url.as_ref())
            .map_or(DEFAULT_BASE_URL, url::Url::as_str)
            .trim_end_matches('/')
            .to_owned();

        Self {
            http: reqwest::Client::new(),
            keys,
            base_url,
        }
    }

    /// Describe a captured image or other media payload
    ///
    /// Sends the prompt and the raw media bytes (base64-encoded inline)
    /// in one `generateContent` call and returns the model's text.
    pub async fn analyze_media(
        &self,
        provider: Provider,
        model: &str,
        prompt: &str,
        mime_type: &str,
        media: &[u8],
    ) -> Result<String, MediaError> {
        let key = self.prepare(provider, "media analysis")?;

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_owned()),
                parts: vec![
                    Part::Text(prompt.to_owned()),
                    Part::InlineData(InlineData {
                        mime_type: mime_type.to_owned(),
                        data: BASE64.encode(media),
                    }),
                ],
            }],
            generation_config: None,
        };

        let response = self.generate(model, &key, &request).await?;

        let text = response.first_text();
        if text.is_empty() {
            return Err(MediaError::EmptyResult {
                provider,
                expected: "analysis text",
            });
        }
        Ok(text)
    }

    /// Generate an image from a text prompt
    ///
    /// Requests both text and image modalities; the first inline-data part
    /// becomes a data URI.
    pub async fn generate_image(
        &self,
        provider: Provider,
        model: &str,
        prompt: &str,
    ) -> Result<GeneratedImage, MediaError> {
        let key = self.prepare(provider, "image generation")?;

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_owned()),
                parts: vec![Part::Text(prompt.to_owned())],
            }],
            generation_config: Some(GenerationConfig {
                response_modalities: Some(vec!["TEXT".to_owned(), "IMAGE".to_owned()]),
            }),
        };

        let response = self.generate(model, &key, &request).await?;

        let Some(image) = response.first_inline_data() else {
            return Err(MediaError::EmptyResult {
                provider,
                expected: "image data",
            });
        };

        let caption = response.first_text();
        Ok(GeneratedImage {
            data_uri: to_data_uri(&image.mime_type, &image.data),
            caption: (!caption.is_empty()).then_some(caption),
        })
    }

    /// Validate provider support and key presence before any network I/O
    fn prepare(&self, provider: Provider, operation: &'static str) -> Result<SecretString, MediaError> {
        if provider != Provider::Gemini {
            return Err(MediaError::Unsupported { provider, operation });
        }
        self.keys
            .key(provider)
            .ok_or(MediaError::MissingKey { provider })
    }

    /// Issue one `generateContent` call and vet the response
    async fn generate(
        &self,
        model: &str,
        key: &SecretString,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, MediaError> {
        let provider = Provider::Gemini;
        let url = gemini::generate_url(&self.base_url, model, key.expose_secret());

        let response = self.http.post(&url).json(request).send().await.map_err(|e| {
            let message = e.to_string();
            tracing::error!(provider = %provider, error = %message, "media request failed");
            self.keys.report_failure(provider, Some(key), &message);
            MediaError::Connection { provider, message }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let snippet = truncate(&body, ERROR_BODY_LIMIT);
            tracing::warn!(provider = %provider, status = %status, "media request returned error");
            self.keys
                .report_failure(provider, Some(key), &format!("{status}: {snippet}"));
            return Err(MediaError::Api {
                provider,
                status: status.as_u16(),
                body: snippet,
            });
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| MediaError::Decode {
            provider,
            message: e.to_string(),
        })?;

        self.keys.report_success(provider);
        Ok(parsed)
    }
}

/// Assemble a data URI from a MIME type and base64 payload
fn to_data_uri(mime_type: &str, base64_data: &str) -> String {
    format!("data:{mime_type};base64,{base64_data}")
}

/// Truncate to a maximum number of characters
fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
