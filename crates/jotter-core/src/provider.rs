use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Supported backend providers
///
/// The first five speak the OpenAI-compatible chat completions protocol;
/// Gemini is the native media backend and has no entry in the chat
/// endpoint table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Groq cloud inference
    Groq,
    /// DeepSeek platform API
    DeepSeek,
    /// `OpenAI` platform API
    OpenAi,
    /// Mistral platform API
    Mistral,
    /// `OpenRouter` aggregation API
    OpenRouter,
    /// Google Gemini (generative language API)
    Gemini,
}

impl Provider {
    /// Whether this provider speaks the OpenAI-compatible chat protocol
    pub const fn is_openai_compatible(self) -> bool {
        !matches!(self, Self::Gemini)
    }
}
