use fh_types::{ContentId, VoteKind};

use crate::error::LedgerResult;
use crate::records::{AggregateRating, VoteRecord};

/// Write boundary of the rating ledger.
///
/// Both operations act on the current viewer and return the freshly
/// recomputed aggregate of the content they touched.
pub trait RatingWriter: Send + Sync {
    /// Replace the viewer's vote on `content` with `kind`.
    ///
    /// Repeating the same kind is not deduplicated: the old record is removed
    /// and a new one appended each time.
    fn cast_vote(&self, content: &ContentId, kind: VoteKind) -> LedgerResult<AggregateRating>;

    /// Remove the viewer's vote on `content`, if any.
    fn retract_vote(&self, content: &ContentId) -> LedgerResult<AggregateRating>;
}

/// Read boundary of the rating ledger.
pub trait RatingReader: Send + Sync {
    /// Every persisted vote record, oldest first.
    fn votes(&self) -> LedgerResult<Vec<VoteRecord>>;

    /// The viewer's current vote on `content`.
    fn viewer_vote(&self, content: &ContentId) -> LedgerResult<Option<VoteKind>>;

    /// Aggregate of one content, computed from [`votes`](Self::votes).
    fn aggregate(&self, content: &ContentId) -> LedgerResult<AggregateRating> {
        let votes = self.votes()?;
        Ok(AggregateRating::from_votes(content, &votes))
    }
}
