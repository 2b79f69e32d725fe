//! OpenAI-compatible chat completion wire format types
//!
//! Response-side fields are all optional with permissive defaults: a
//! missing field is ignored and decoding continues, matching how the
//! streaming deltas actually arrive.

use jotter_core::ChatMessage;
use serde::{Deserialize, Serialize};

// -- Request types --

/// Chat completion request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    /// Model identifier
    pub model: String,
    /// Conversation messages, system placement already applied
    pub messages: Vec<ChatMessage>,
    /// Whether to stream the response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    /// Sampling temperature; omitted entirely for the reasoning model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Tool definitions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<WireTool>>,
    /// Tool choice mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<String>,
}

/// Tool definition in the `OpenAI` wire format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireTool {
    /// Tool type (always "function")
    #[serde(rename = "type")]
    pub tool_type: String,
    /// Function specification
    pub function: WireFunction,
}

/// Function specification within a wire tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireFunction {
    /// Function name
    pub name: String,
    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON Schema for parameters, type strings normalized to lowercase
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
}

// -- Single-shot response types --

/// Non-streaming chat completion response
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    /// Response identifier
    #[serde(default)]
    pub id: Option<String>,
    /// Model that produced the response
    #[serde(default)]
    pub model: Option<String>,
    /// Generated choices
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

/// Choice within a non-streaming response
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    /// Generated message
    pub message: ChoiceMessage,
    /// Why generation stopped
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Message within a response choice
#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    /// Text content
    #[serde(default)]
    pub content: Option<String>,
}

// -- Streaming types --

/// One parsed SSE data chunk
#[derive(Debug, Clone, Deserialize)]
pub struct StreamChunk {
    /// Delta choices; empty on keep-alive/usage chunks
    #[serde(default)]
    pub choices: Vec<StreamChoice>,
}

/// Choice within a streaming chunk
#[derive(Debug, Clone, Deserialize)]
pub struct StreamChoice {
    /// Incremental delta; absent chunks are skipped
    #[serde(default)]
    pub delta: Option<StreamDelta>,
    /// Finish reason (present on the final chunk)
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Delta content within a streaming choice
#[derive(Debug, Clone, Deserialize)]
pub struct StreamDelta {
    /// Incremental answer text
    #[serde(default)]
    pub content: Option<String>,
    /// Incremental reasoning-trace text; DeepSeek sends
    /// `reasoning_content`, `OpenRouter` sends `reasoning`
    #[serde(default, alias = "reasoning")]
    pub reasoning_content: Option<String>,
    /// Incremental tool call fragments
    #[serde(default)]
    pub tool_calls: Option<Vec<StreamToolCall>>,
}

/// Tool call fragment within a streaming delta
#[derive(Debug, Clone, Deserialize)]
pub struct StreamToolCall {
    /// Index within the accumulated `tool_calls` array
    pub index: u32,
    /// Tool call id (first fragment only)
    #[serde(default)]
    pub id: Option<String>,
    /// Partial function call
    #[serde(default)]
    pub function: Option<StreamFunctionCall>,
}

/// Partial function call within a streaming tool call
#[derive(Debug, Clone, Deserialize)]
pub struct StreamFunctionCall {
    /// Function name (first fragment only)
    #[serde(default)]
    pub name: Option<String>,
    /// Argument string fragment
    #[serde(default)]
    pub arguments: Option<String>,
}
