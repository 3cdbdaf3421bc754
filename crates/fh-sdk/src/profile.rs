use std::path::{Path, PathBuf};
use std::sync::Arc;

use fh_ledger::{
    AggregateRating, RatingLedger, RatingProjection, RatingReader, RatingSummary, RatingWriter,
    VoteRecord,
};
use fh_store::{FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore};
use fh_threads::{Comment, CommentThreadStore, Message, Reply};
use fh_types::{ContentId, MessageId, ViewerId, VoteKind};
use serde::Serialize;
use tracing::debug;

use crate::error::{SdkError, SdkResult};

/// Result of pressing a like/dislike button.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteToggle {
    /// The viewer's vote after the toggle; `None` when it was retracted.
    pub viewer_vote: Option<VoteKind>,
    pub aggregate: AggregateRating,
}

/// One viewer's local profile: identity, votes, threads and display name
/// over a single key-value store.
pub struct Profile {
    store: Arc<dyn KeyValueStore>,
    ledger: RatingLedger,
    threads: CommentThreadStore,
    path: Option<PathBuf>,
}

impl Profile {
    /// Open (or create on first write) the profile document at `path`.
    pub fn open(path: impl AsRef<Path>) -> SdkResult<Self> {
        let path = path.as_ref();
        let store = FileKeyValueStore::open(path)?;
        let mut profile = Self::with_store(Arc::new(store));
        profile.path = Some(path.to_path_buf());
        Ok(profile)
    }

    /// A throwaway profile that lives only as long as the handle.
    pub fn in_memory() -> Self {
        Self::with_store(Arc::new(InMemoryKeyValueStore::new()))
    }

    pub fn with_store(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            ledger: RatingLedger::new(Arc::clone(&store)),
            threads: CommentThreadStore::new(Arc::clone(&store)),
            store,
            path: None,
        }
    }

    /// Backing file, if the profile is file-backed.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn ratings(&self) -> &RatingLedger {
        &self.ledger
    }

    pub fn threads(&self) -> &CommentThreadStore {
        &self.threads
    }

    /// Wipe every key of the profile, including the viewer id.
    pub fn reset(&self) -> SdkResult<()> {
        self.store.clear()?;
        debug!("profile reset");
        Ok(())
    }

    // ---- Identity ----

    pub fn viewer_id(&self) -> SdkResult<ViewerId> {
        Ok(self.ledger.identity().get_or_create_viewer_id()?)
    }

    // ---- Ratings ----

    pub fn cast_vote(&self, content: &ContentId, kind: VoteKind) -> SdkResult<AggregateRating> {
        Ok(self.ledger.cast_vote(content, kind)?)
    }

    pub fn retract_vote(&self, content: &ContentId) -> SdkResult<AggregateRating> {
        Ok(self.ledger.retract_vote(content)?)
    }

    /// Button semantics: pressing the kind the viewer already chose
    /// retracts it, anything else casts `kind`.
    pub fn toggle_vote(&self, content: &ContentId, kind: VoteKind) -> SdkResult<VoteToggle> {
        if self.ledger.viewer_vote(content)? == Some(kind) {
            let aggregate = self.ledger.retract_vote(content)?;
            return Ok(VoteToggle {
                viewer_vote: None,
                aggregate,
            });
        }
        let aggregate = self.ledger.cast_vote(content, kind)?;
        Ok(VoteToggle {
            viewer_vote: Some(kind),
            aggregate,
        })
    }

    pub fn rating(&self, content: &ContentId) -> SdkResult<RatingSummary> {
        Ok(RatingProjection::summary(&self.ledger, content)?)
    }

    pub fn all_ratings(&self) -> SdkResult<Vec<AggregateRating>> {
        Ok(self.ledger.all_aggregates()?)
    }

    pub fn votes(&self) -> SdkResult<Vec<VoteRecord>> {
        Ok(self.ledger.votes()?)
    }

    // ---- Threads ----

    pub fn display_name(&self) -> SdkResult<Option<String>> {
        Ok(self.threads.display_name()?)
    }

    pub fn set_display_name(&self, name: &str) -> SdkResult<Option<String>> {
        Ok(self.threads.set_display_name(name)?)
    }

    pub fn thread(&self, content: &ContentId) -> SdkResult<Vec<Message>> {
        Ok(self.threads.thread(content)?)
    }

    /// Post as the profile's display name.
    pub fn post_message(&self, content: &ContentId, body: &str) -> SdkResult<Option<Message>> {
        let author = self.author()?;
        Ok(self.threads.post_message(content, &author, body)?)
    }

    /// Reply as the profile's display name.
    pub fn post_reply(
        &self,
        content: &ContentId,
        parent: &MessageId,
        body: &str,
    ) -> SdkResult<Option<Reply>> {
        let author = self.author()?;
        Ok(self.threads.post_reply(content, parent, &author, body)?)
    }

    pub fn toggle_like(
        &self,
        content: &ContentId,
        id: &MessageId,
        parent: Option<&MessageId>,
    ) -> SdkResult<Comment> {
        Ok(self.threads.toggle_like(content, id, parent)?)
    }

    fn author(&self) -> SdkResult<String> {
        self.threads.display_name()?.ok_or(SdkError::NoDisplayName)
    }
}

impl std::fmt::Debug for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Profile")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cid(s: &str) -> ContentId {
        ContentId::new(s)
    }

    #[test]
    fn toggle_same_kind_retracts() {
        let profile = Profile::in_memory();
        let x = cid("x");

        let first = profile.toggle_vote(&x, VoteKind::Like).unwrap();
        assert_eq!(first.viewer_vote, Some(VoteKind::Like));
        assert_eq!(first.aggregate.likes, 1);

        let second = profile.toggle_vote(&x, VoteKind::Like).unwrap();
        assert_eq!(second.viewer_vote, None);
        assert_eq!(second.aggregate.total_votes, 0);
    }

    #[test]
    fn toggle_other_kind_switches() {
        let profile = Profile::in_memory();
        let x = cid("x");
        profile.toggle_vote(&x, VoteKind::Like).unwrap();
        let switched = profile.toggle_vote(&x, VoteKind::Dislike).unwrap();
        assert_eq!(switched.viewer_vote, Some(VoteKind::Dislike));
        assert_eq!((switched.aggregate.likes, switched.aggregate.dislikes), (0, 1));
    }

    #[test]
    fn posting_requires_display_name() {
        let profile = Profile::in_memory();
        assert!(matches!(
            profile.post_message(&cid("x"), "hi"),
            Err(SdkError::NoDisplayName)
        ));
        profile.set_display_name("Ana").unwrap();
        let msg = profile.post_message(&cid("x"), "hi").unwrap().unwrap();
        assert_eq!(msg.user, "Ana");

        let reply = profile
            .post_reply(&cid("x"), msg.id(), "answer")
            .unwrap()
            .unwrap();
        assert_eq!(reply.user, "Ana");
    }

    #[test]
    fn reset_clears_everything() {
        let profile = Profile::in_memory();
        let before = profile.viewer_id().unwrap();
        profile.cast_vote(&cid("x"), VoteKind::Like).unwrap();
        profile.set_display_name("Ana").unwrap();

        profile.reset().unwrap();
        assert!(profile.votes().unwrap().is_empty());
        assert_eq!(profile.display_name().unwrap(), None);
        assert_ne!(profile.viewer_id().unwrap(), before);
    }

    #[test]
    fn file_profile_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("profile.json");
        let x = cid("x");

        let (viewer, message_id) = {
            let profile = Profile::open(&path).unwrap();
            assert_eq!(profile.path(), Some(path.as_path()));
            profile.cast_vote(&x, VoteKind::Dislike).unwrap();
            profile.set_display_name("Ana").unwrap();
            let msg = profile.post_message(&x, "persisted").unwrap().unwrap();
            (profile.viewer_id().unwrap(), msg.id().clone())
        };

        let reopened = Profile::open(&path).unwrap();
        assert_eq!(reopened.viewer_id().unwrap(), viewer);
        assert_eq!(reopened.ratings().viewer_vote(&x).unwrap(), Some(VoteKind::Dislike));
        assert_eq!(reopened.rating(&x).unwrap().aggregate.dislikes, 1);
        let thread = reopened.thread(&x).unwrap();
        assert_eq!(thread.len(), 1);
        assert_eq!(thread[0].id(), &message_id);
    }

    #[test]
    fn vote_toggle_serializes_camel_case() {
        let profile = Profile::in_memory();
        let toggle = profile.toggle_vote(&cid("x"), VoteKind::Like).unwrap();
        let json = serde_json::to_value(&toggle).unwrap();
        assert_eq!(json["viewerVote"], "like");
        assert_eq!(json["aggregate"]["averageRating"], 10.0);
    }
}
