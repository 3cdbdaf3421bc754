use fh_types::{ContentId, Timestamp, ViewerId, VoteKind};
use serde::{Deserialize, Serialize};

/// One viewer's vote on one content.
///
/// Field names follow the persisted layout (`contentId`, `userId`, `type`,
/// `timestamp`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRecord {
    pub content_id: ContentId,
    pub user_id: ViewerId,
    #[serde(rename = "type")]
    pub kind: VoteKind,
    pub timestamp: Timestamp,
}

impl VoteRecord {
    pub fn new(content_id: ContentId, user_id: ViewerId, kind: VoteKind) -> Self {
        Self {
            content_id,
            user_id,
            kind,
            timestamp: Timestamp::now(),
        }
    }

    /// Whether this record is the active vote of `viewer` on `content`.
    pub fn is_for(&self, content: &ContentId, viewer: &ViewerId) -> bool {
        &self.content_id == content && &self.user_id == viewer
    }
}

/// Like/dislike summary of one content, derived from the vote collection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateRating {
    pub content_id: ContentId,
    pub likes: u32,
    pub dislikes: u32,
    pub total_votes: u32,
    /// Share of likes on a 0-10 scale with one decimal.
    pub average_rating: f64,
}

impl AggregateRating {
    /// The aggregate of a content nobody has voted on.
    pub fn empty(content_id: ContentId) -> Self {
        Self {
            content_id,
            likes: 0,
            dislikes: 0,
            total_votes: 0,
            average_rating: 0.0,
        }
    }

    /// Compute the aggregate of `content_id` from any slice of the vote
    /// collection. Records for other contents are ignored.
    pub fn from_votes<'a>(
        content_id: &ContentId,
        votes: impl IntoIterator<Item = &'a VoteRecord>,
    ) -> Self {
        let (likes, dislikes) = votes
            .into_iter()
            .filter(|v| &v.content_id == content_id)
            .fold((0u32, 0u32), |(l, d), v| match v.kind {
                VoteKind::Like => (l + 1, d),
                VoteKind::Dislike => (l, d + 1),
            });
        let total_votes = likes + dislikes;
        Self {
            content_id: content_id.clone(),
            likes,
            dislikes,
            total_votes,
            average_rating: average_rating(likes, total_votes),
        }
    }

    /// `"X.X/10"` display form.
    pub fn formatted(&self) -> String {
        format!("{:.1}/10", self.average_rating)
    }
}

/// `round(likes / total * 100) / 10`, or 0 when nobody voted.
fn average_rating(likes: u32, total_votes: u32) -> f64 {
    if total_votes == 0 {
        return 0.0;
    }
    let share = f64::from(likes) / f64::from(total_votes);
    (share * 100.0).round() / 10.0
}
