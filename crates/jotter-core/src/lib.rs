//! Shared domain types for the jotter provider gateway
//!
//! Holds the provider identifiers, conversation message model, and the
//! vendor-neutral tool declaration format shared by the chat and media
//! crates.

#![allow(clippy::must_use_candidate)]

pub mod message;
pub mod provider;
pub mod tool;

pub use message::{ChatMessage, ContentPart, ImageUrl, MessageContent, Role};
pub use provider::Provider;
pub use tool::{FunctionDeclaration, ToolDeclaration};
