use fh_types::{ContentId, Timestamp, VoteKind};
use serde::Serialize;

use crate::error::LedgerResult;
use crate::records::AggregateRating;
use crate::traits::RatingReader;

/// What a rating widget shows for one content.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary {
    #[serde(flatten)]
    pub aggregate: AggregateRating,
    pub formatted: String,
    pub viewer_vote: Option<VoteKind>,
    pub last_vote_at: Option<Timestamp>,
}

/// Deterministic projection builders.
pub struct RatingProjection;

impl RatingProjection {
    pub fn summary<R: RatingReader + ?Sized>(
        reader: &R,
        content: &ContentId,
    ) -> LedgerResult<RatingSummary> {
        let votes = reader.votes()?;
        let aggregate = AggregateRating::from_votes(content, &votes);
        let last_vote_at = votes
            .iter()
            .filter(|v| &v.content_id == content)
            .map(|v| v.timestamp)
            .max();

        Ok(RatingSummary {
            formatted: aggregate.formatted(),
            viewer_vote: reader.viewer_vote(content)?,
            last_vote_at,
            aggregate,
        })
    }

    /// Every voted content, best rated first.
    ///
    /// Ties break on vote count (more first) and then on content id, so the
    /// order depends only on the vote collection.
    pub fn ranked<R: RatingReader + ?Sized>(reader: &R) -> LedgerResult<Vec<AggregateRating>> {
        let votes = reader.votes()?;
        let mut ids: Vec<&ContentId> = votes.iter().map(|v| &v.content_id).collect();
        ids.sort();
        ids.dedup();

        let mut ranked: Vec<AggregateRating> = ids
            .into_iter()
            .map(|id| AggregateRating::from_votes(id, &votes))
            .collect();
        ranked.sort_by(|a, b| {
            b.average_rating
                .total_cmp(&a.average_rating)
                .then(b.total_votes.cmp(&a.total_votes))
                .then_with(|| a.content_id.cmp(&b.content_id))
        });
        Ok(ranked)
    }
}
