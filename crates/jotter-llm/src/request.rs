//! Request shaping for the OpenAI-compatible chat providers
//!
//! Owns the endpoint table and the per-model quirks: the designated
//! reasoning model rejects a `system` role and a `temperature` field, and
//! reasoning variants reject tool use.

use jotter_config::{AppIdentity, ChatDefaults};
use jotter_core::{ChatMessage, ContentPart, MessageContent, Provider, ToolDeclaration};

use crate::protocol::ChatCompletionRequest;
use crate::tools;

/// Model that rejects a separate `system` message and a `temperature`
/// field
pub const REASONING_MODEL: &str = "deepseek-reasoner";

/// Substring marking hosted reasoning variants that reject tool use
const REASONING_VARIANT_MARKER: &str = "r1";

/// Default chat completion endpoints, overridable per provider in config
pub(crate) const CHAT_ENDPOINTS: [(Provider, &str); 5] = [
    (Provider::Groq, "https://api.groq.com/openai/v1/chat/completions"),
    (Provider::DeepSeek, "https://api.deepseek.com/chat/completions"),
    (Provider::OpenAi, "https://api.openai.com/v1/chat/completions"),
    (Provider::Mistral, "https://api.mistral.ai/v1/chat/completions"),
    (Provider::OpenRouter, "https://openrouter.ai/api/v1/chat/completions"),
];

/// Default chat endpoint for a provider; `None` for providers outside the
/// OpenAI-compatible table
pub fn chat_endpoint(provider: Provider) -> Option<&'static str> {
    CHAT_ENDPOINTS
        .iter()
        .find(|(candidate, _)| *candidate == provider)
        .map(|(_, url)| *url)
}

/// Whether a model id names the designated reasoning model
pub fn is_reasoning_model(model: &str) -> bool {
    model == REASONING_MODEL
}

/// Whether tools may be attached for this model
fn accepts_tools(model: &str) -> bool {
    !is_reasoning_model(model) && !model.contains(REASONING_VARIANT_MARKER)
}

/// Build the wire body for a chat completion request
///
/// The caller's message slice is never mutated; a fresh message vector is
/// returned with system placement applied.
pub fn build_body(
    model: &str,
    messages: &[ChatMessage],
    system_instruction: Option<&str>,
    tool_blocks: Option<&[ToolDeclaration]>,
    defaults: &ChatDefaults,
    stream: bool,
) -> ChatCompletionRequest {
    let instruction = system_instruction.unwrap_or(&defaults.system_instruction);
    let messages = place_system_instruction(model, messages, instruction);

    let temperature = if is_reasoning_model(model) {
        None
    } else {
        Some(defaults.temperature)
    };

    let tools = if accepts_tools(model) {
        tool_blocks.and_then(tools::to_openai_tools)
    } else {
        None
    };
    let tool_choice = tools.is_some().then(|| "auto".to_owned());

    ChatCompletionRequest {
        model: model.to_owned(),
        messages,
        stream: stream.then_some(true),
        temperature,
        tools,
        tool_choice,
    }
}

/// Apply the model-specific system instruction placement
///
/// The reasoning model rejects a `system` role, so the instruction is
/// prefixed into a copy of the first message; every other model gets a
/// leading `system` message.
fn place_system_instruction(model: &str, messages: &[ChatMessage], instruction: &str) -> Vec<ChatMessage> {
    if is_reasoning_model(model) {
        let mut merged = messages.to_vec();
        match merged.first_mut() {
            Some(first) => prefix_instruction(first, instruction),
            None => merged.push(ChatMessage::user(instruction)),
        }
        merged
    } else {
        let mut shaped = Vec::with_capacity(messages.len() + 1);
        shaped.push(ChatMessage::system(instruction));
        shaped.extend_from_slice(messages);
        shaped
    }
}

fn prefix_instruction(message: &mut ChatMessage, instruction: &str) {
    match &mut message.content {
        MessageContent::Text(text) => {
            let merged = format!("{instruction}\n\n{text}");
            *text = merged;
        }
        MessageContent::Parts(parts) => parts.insert(
            0,
            ContentPart::Text {
                text: instruction.to_owned(),
            },
        ),
    }
}

/// Extra identity headers required by specific providers
///
/// `OpenRouter` expects the calling application to identify itself; no
/// other provider receives these headers.
pub fn identity_headers(provider: Provider, app: &AppIdentity) -> Vec<(&'static str, String)> {
    match provider {
        Provider::OpenRouter => vec![
            ("HTTP-Referer", app.referer.to_string()),
            ("X-Title", app.title.clone()),
        ],
        _ => Vec::new(),
    }
}
