//! Read-only content catalog for FandomHub.
//!
//! The catalog is a fixed list of games, movies and series loaded once at
//! startup, either from the JSON document bundled with this crate or from a
//! file. Each content optionally carries named category buckets
//! (`characters`, `weapons`, `locations`, ...) whose items hold a
//! [`CategoryData`] attribute bag.
//!
//! # Design Rules
//!
//! 1. The catalog is immutable after load; share it behind an `Arc`.
//! 2. Lookups never fail. Unknown ids are `None` or empty lists.
//! 3. Seed order is preserved everywhere except `trending`, which sorts by
//!    rank.

pub mod catalog;
pub mod error;
pub mod model;

pub use catalog::{ContentCatalog, InMemoryCatalog, LIST_LIMIT};
pub use error::{CatalogError, CatalogResult};
pub use model::{
    display_value, Attributes, CategoryData, CategoryEntry, CategoryItem, CharacterData,
    ContentKind, ContentRecord, ContentSummary, LocationData, WeaponData,
};
