//! Foundation types for FandomHub.
//!
//! Shared by the ledger, thread, catalog and front-end crates.
//!
//! # Key Types
//!
//! - [`ContentId`] -- identifier of a cataloged game, movie or series
//! - [`ViewerId`] -- pseudo-anonymous identity of one local profile
//! - [`MessageId`] -- time-ordered identifier of a comment or reply
//! - [`VoteKind`] -- like or dislike
//! - [`Timestamp`] -- wall-clock milliseconds since the UNIX epoch

pub mod error;
pub mod identity;
pub mod temporal;
pub mod vote;

pub use error::TypeError;
pub use identity::{ContentId, MessageId, ViewerId};
pub use temporal::Timestamp;
pub use vote::VoteKind;
