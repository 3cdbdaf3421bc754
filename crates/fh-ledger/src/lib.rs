//! Rating ledger for FandomHub.
//!
//! This crate provides:
//! - The [`IdentityProvider`] that lazily creates and persists the profile's
//!   viewer id
//! - [`VoteRecord`] and the derived [`AggregateRating`]
//! - `RatingReader` / `RatingWriter` trait boundaries
//! - [`RatingLedger`], the store-backed implementation
//! - Deterministic projections over the whole vote collection
//!
//! Votes are last-write-wins per (content, viewer): casting a new vote
//! removes the previous one first. Aggregates are never cached; every read
//! recomputes them from the persisted collection.

pub mod error;
pub mod identity;
pub mod keys;
pub mod ledger;
pub mod projection;
pub mod records;
pub mod traits;

pub use error::{LedgerError, LedgerResult};
pub use identity::IdentityProvider;
pub use ledger::RatingLedger;
pub use projection::{RatingProjection, RatingSummary};
pub use records::{AggregateRating, VoteRecord};
pub use traits::{RatingReader, RatingWriter};
