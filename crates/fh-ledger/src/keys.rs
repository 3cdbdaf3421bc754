//! Profile keys owned by the rating ledger.

/// The viewer id of the profile.
pub const VIEWER_ID: &str = "user_id";

/// JSON array of every [`VoteRecord`](crate::VoteRecord).
pub const VOTES: &str = "content_ratings";

/// JSON object mapping content id to the viewer's current vote kind.
pub const VIEWER_VOTES: &str = "user_ratings";
