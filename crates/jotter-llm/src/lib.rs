//! Multi-provider chat completion core for jotter
//!
//! Normalizes several OpenAI-compatible streaming chat APIs (Groq,
//! DeepSeek, `OpenAI`, Mistral, `OpenRouter`) into one incremental event
//! model: request shaping with per-provider quirks, tool-schema
//! translation, and a pull-based SSE decoder that reassembles partial
//! lines and fragmented tool-call arguments.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod client;
pub mod error;
pub mod protocol;
pub mod request;
mod sse;
pub mod stream;
pub mod tools;

pub use client::ChatClient;
pub use error::ChatError;
pub use stream::{ChatEvent, ChatStream, FunctionCall};
