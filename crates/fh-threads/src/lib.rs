//! Per-content comment threads for FandomHub.
//!
//! A thread is an ordered list of top-level [`Message`]s, each carrying one
//! level of [`Reply`]s. Threads live in the local profile store under one key
//! per content id and are rewritten in full on every mutation.
//!
//! # Design Rules
//!
//! 1. Depth is fixed at two: a reply has no `replies` field.
//! 2. Blank bodies are ignored, never stored.
//! 3. `likes` moves by exactly one per toggle and never drops below zero.
//! 4. Threads stored under the legacy `chat_` key are read transparently and
//!    moved to the current key on first write.

pub mod error;
pub mod keys;
pub mod message;
mod profile;
pub mod store;

pub use error::{ThreadError, ThreadResult};
pub use message::{Comment, Message, Reply};
pub use store::CommentThreadStore;
