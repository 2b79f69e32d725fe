//! Credential resolution and provider health tracking
//!
//! The [`KeyStore`] is an explicitly constructed object injected into each
//! client rather than process-global state, so tests stay deterministic
//! and concurrent clients can hold independent stores.

mod store;

pub use store::{KeyStore, ProviderHealth};
