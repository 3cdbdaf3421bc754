//! Local profile storage for FandomHub.
//!
//! A profile store is a synchronous, string-keyed, string-valued map scoped to
//! one viewer. It plays the role a browser's local storage plays for a web
//! front end: the rating ledger and the comment threads serialize their state
//! to JSON and write it back on every mutation.
//!
//! # Storage Backends
//!
//! All backends implement the [`KeyValueStore`] trait:
//!
//! - [`InMemoryKeyValueStore`] -- `BTreeMap`-based store for tests and embedding
//! - [`FileKeyValueStore`] -- single JSON document on disk, rewritten on every write
//!
//! # Design Rules
//!
//! 1. The store never interprets values -- it is a pure key-value store.
//! 2. Every `set`/`remove` is durable before it returns (file backend).
//! 3. A missing key is `Ok(None)`, never an error.
//! 4. All I/O errors are propagated, never silently ignored.

pub mod error;
pub mod file;
pub mod json;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use file::FileKeyValueStore;
pub use json::{load_json, save_json};
pub use memory::InMemoryKeyValueStore;
pub use traits::KeyValueStore;
