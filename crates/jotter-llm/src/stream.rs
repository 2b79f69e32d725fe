//! Pull-based decoding of streaming chat completion responses
//!
//! [`ChatStream`] consumes the raw response byte stream and yields
//! normalized incremental events. Each `next_event` call performs at most
//! one read-and-decode step; the cancellation token is checked at every
//! step and raced against every read.

use std::collections::{BTreeMap, VecDeque};
use std::pin::Pin;

use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use jotter_core::Provider;
use tokio_util::sync::CancellationToken;

use crate::error::ChatError;
use crate::protocol::{StreamChunk, StreamToolCall};
use crate::sse::LineBuffer;

/// Incremental result from a streaming chat completion
#[derive(Debug, Clone, PartialEq)]
pub enum ChatEvent {
    /// Answer text, or reasoning-trace text wrapped in `<think>` tags
    Text(String),
    /// A finalized tool invocation, synthesized after the stream ends
    FunctionCall(FunctionCall),
}

/// A finalized tool invocation
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    /// Provider-assigned call id, when one was sent
    pub id: Option<String>,
    /// Declared function name
    pub name: String,
    /// Parsed arguments object
    pub args: serde_json::Value,
}

/// In-flight tool call, accumulated across chunks by index
#[derive(Debug, Default)]
struct ToolCallDraft {
    id: Option<String>,
    name: String,
    args: String,
}

pub(crate) type BodyStream = Pin<Box<dyn Stream<Item = reqwest::Result<Bytes>> + Send>>;

/// Streaming chat completion response
pub struct ChatStream {
    provider: Provider,
    body: Option<BodyStream>,
    cancel: CancellationToken,
    lines: LineBuffer,
    pending: VecDeque<ChatEvent>,
    drafts: BTreeMap<u32, ToolCallDraft>,
    saw_bytes: bool,
}

impl std::fmt::Debug for ChatStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatStream")
            .field("provider", &self.provider)
            .field("terminated", &self.body.is_none())
            .field("pending", &self.pending.len())
            .field("drafts", &self.drafts.len())
            .field("saw_bytes", &self.saw_bytes)
            .finish()
    }
}

impl ChatStream {
    pub(crate) fn new(provider: Provider, body: BodyStream, cancel: CancellationToken) -> Self {
        Self {
            provider,
            body: Some(body),
            cancel,
            lines: LineBuffer::default(),
            pending: VecDeque::new(),
            drafts: BTreeMap::new(),
            saw_bytes: false,
        }
    }

    /// Pull the next event from the stream
    ///
    /// Returns `None` once the stream is exhausted. Cancellation yields a
    /// single `Err(Cancelled)`, discards any buffered events and
    /// accumulated tool calls, and terminates the stream.
    pub async fn next_event(&mut self) -> Option<Result<ChatEvent, ChatError>> {
        loop {
            if self.body.is_some() && self.cancel.is_cancelled() {
                return Some(Err(self.cancel_now()));
            }

            if let Some(event) = self.pending.pop_front() {
                return Some(Ok(event));
            }

            let body = self.body.as_mut()?;
            let read = tokio::select! {
                () = self.cancel.cancelled() => None,
                chunk = body.next() => Some(chunk),
            };
            let Some(chunk) = read else {
                return Some(Err(self.cancel_now()));
            };

            match chunk {
                Some(Ok(bytes)) => {
                    self.saw_bytes = true;
                    for line in self.lines.feed(&bytes) {
                        self.decode_line(&line);
                    }
                }
                Some(Err(e)) => {
                    self.release();
                    return Some(Err(ChatError::Streaming(e.to_string())));
                }
                None => {
                    if let Some(line) = self.lines.flush() {
                        self.decode_line(&line);
                    }
                    self.finalize_tool_calls();
                    self.release();
                    if !self.saw_bytes {
                        return Some(Err(ChatError::EmptyBody {
                            provider: self.provider,
                        }));
                    }
                }
            }
        }
    }

    /// Whether the underlying reader has been released
    pub fn is_terminated(&self) -> bool {
        self.body.is_none()
    }

    /// Decode one complete line from the stream
    ///
    /// Anything that is not a well-formed `data:` payload is dropped
    /// without aborting the stream: a payload truncated by the network
    /// arrives complete on a later read.
    fn decode_line(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        let Some(payload) = line.strip_prefix("data: ") else {
            return;
        };
        if payload == "[DONE]" {
            return;
        }

        let chunk: StreamChunk = match serde_json::from_str(payload) {
            Ok(chunk) => chunk,
            Err(e) => {
                tracing::trace!(error = %e, "dropping undecodable stream line");
                return;
            }
        };

        let Some(delta) = chunk.choices.into_iter().next().and_then(|choice| choice.delta) else {
            return;
        };

        if let Some(content) = delta.content
            && !content.is_empty()
        {
            self.pending.push_back(ChatEvent::Text(content));
        }

        if let Some(reasoning) = delta.reasoning_content
            && !reasoning.is_empty()
        {
            self.pending.push_back(ChatEvent::Text(format!("<think>{reasoning}</think>")));
        }

        if let Some(calls) = delta.tool_calls {
            for call in calls {
                self.merge_tool_call(call);
            }
        }
    }

    /// Merge one tool-call fragment into the per-index draft
    ///
    /// The first fragment for an index creates the draft with id, name,
    /// and arguments; later fragments append only to the argument string.
    fn merge_tool_call(&mut self, fragment: StreamToolCall) {
        match self.drafts.get_mut(&fragment.index) {
            Some(draft) => {
                if let Some(function) = fragment.function
                    && let Some(arguments) = function.arguments
                {
                    draft.args.push_str(&arguments);
                }
            }
            None => {
                let (name, args) = fragment
                    .function
                    .map_or_else(Default::default, |function| {
                        (
                            function.name.unwrap_or_default(),
                            function.arguments.unwrap_or_default(),
                        )
                    });
                self.drafts.insert(
                    fragment.index,
                    ToolCallDraft {
                        id: fragment.id,
                        name,
                        args,
                    },
                );
            }
        }
    }

    /// Finalize accumulated tool calls after a clean stream end
    ///
    /// A draft whose argument string fails to parse degrades to a
    /// diagnostic text event for that call alone; other drafts still
    /// finalize.
    fn finalize_tool_calls(&mut self) {
        for (_, draft) in std::mem::take(&mut self.drafts) {
            match serde_json::from_str::<serde_json::Value>(&draft.args) {
                Ok(args) => self.pending.push_back(ChatEvent::FunctionCall(FunctionCall {
                    id: draft.id,
                    name: draft.name,
                    args,
                })),
                Err(e) => {
                    tracing::warn!(tool = %draft.name, error = %e, "tool call arguments failed to parse");
                    self.pending.push_back(ChatEvent::Text(format!(
                        "[tool call \"{}\" returned arguments that could not be parsed]",
                        draft.name
                    )));
                }
            }
        }
    }

    fn cancel_now(&mut self) -> ChatError {
        self.pending.clear();
        self.drafts.clear();
        self.release();
        ChatError::Cancelled
    }

    fn release(&mut self) {
        self.body = None;
    }
}
