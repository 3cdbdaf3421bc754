//! High-level SDK for FandomHub.
//!
//! [`Profile`] is the main entry point for front ends: it wires one
//! key-value store to the identity provider, the rating ledger and the
//! comment threads, and adds the button-level behaviors (vote toggling,
//! posting under the profile's display name).

pub mod error;
pub mod profile;

pub use error::{SdkError, SdkResult};
pub use profile::{Profile, VoteToggle};

// Re-export key types
pub use fh_ledger::{AggregateRating, RatingSummary, VoteRecord};
pub use fh_threads::{Comment, Message, Reply};
pub use fh_types::{ContentId, MessageId, ViewerId, VoteKind};
