use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use fh_store::{load_json, save_json, KeyValueStore};
use fh_types::{ContentId, ViewerId, VoteKind};
use tracing::{debug, warn};

use crate::error::{LedgerError, LedgerResult};
use crate::identity::IdentityProvider;
use crate::keys;
use crate::records::{AggregateRating, VoteRecord};
use crate::traits::{RatingReader, RatingWriter};

/// Per-viewer index: content id -> current vote kind.
type ViewerIndex = BTreeMap<ContentId, VoteKind>;

/// Store-backed rating ledger.
///
/// The full vote collection and the viewer index are rewritten on every
/// mutation. Mutations are serialized by an internal lock so the two keys
/// never disagree.
pub struct RatingLedger {
    store: Arc<dyn KeyValueStore>,
    identity: IdentityProvider,
    write_lock: Mutex<()>,
}

impl RatingLedger {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let identity = IdentityProvider::new(Arc::clone(&store));
        Self::with_identity(store, identity)
    }

    pub fn with_identity(store: Arc<dyn KeyValueStore>, identity: IdentityProvider) -> Self {
        Self {
            store,
            identity,
            write_lock: Mutex::new(()),
        }
    }

    pub fn identity(&self) -> &IdentityProvider {
        &self.identity
    }

    /// Aggregates of every content that has at least one vote, in the order
    /// the contents first appear in the vote collection.
    pub fn all_aggregates(&self) -> LedgerResult<Vec<AggregateRating>> {
        let votes = self.votes()?;
        let mut seen = Vec::<&ContentId>::new();
        for vote in &votes {
            if !seen.contains(&&vote.content_id) {
                seen.push(&vote.content_id);
            }
        }
        Ok(seen
            .into_iter()
            .map(|id| AggregateRating::from_votes(id, &votes))
            .collect())
    }

    /// `"X.X/10"` display form of a content's aggregate.
    pub fn formatted_rating(&self, content: &ContentId) -> LedgerResult<String> {
        Ok(self.aggregate(content)?.formatted())
    }

    fn load_votes(&self) -> LedgerResult<Vec<VoteRecord>> {
        Ok(load_json(self.store.as_ref(), keys::VOTES)?.unwrap_or_default())
    }

    fn load_index(&self) -> LedgerResult<ViewerIndex> {
        Ok(load_json(self.store.as_ref(), keys::VIEWER_VOTES)?.unwrap_or_default())
    }

    /// Write both keys. When the index write fails the previous vote
    /// collection is put back, so the two keys only ever change together.
    fn persist(&self, votes: &[VoteRecord], index: &ViewerIndex) -> LedgerResult<()> {
        let store = self.store.as_ref();
        let previous = store.get(keys::VOTES)?;
        save_json(store, keys::VOTES, votes)?;
        if let Err(err) = save_json(store, keys::VIEWER_VOTES, index) {
            let restored = match &previous {
                Some(raw) => store.set(keys::VOTES, raw),
                None => store.remove(keys::VOTES).map(|_| ()),
            };
            if let Err(rollback) = restored {
                warn!(error = %rollback, "failed to restore vote collection");
            }
            return Err(err.into());
        }
        Ok(())
    }

    /// Remove the active vote of `viewer` on `content` from both collections.
    fn drop_active(
        votes: &mut Vec<VoteRecord>,
        index: &mut ViewerIndex,
        content: &ContentId,
        viewer: &ViewerId,
    ) -> bool {
        let before = votes.len();
        votes.retain(|v| !v.is_for(content, viewer));
        index.remove(content);
        votes.len() != before
    }
}

impl RatingWriter for RatingLedger {
    fn cast_vote(&self, content: &ContentId, kind: VoteKind) -> LedgerResult<AggregateRating> {
        let _guard = self.write_lock.lock().map_err(|_| LedgerError::Poisoned)?;
        let viewer = self.identity.get_or_create_viewer_id()?;

        let mut votes = self.load_votes()?;
        let mut index = self.load_index()?;
        let replaced = Self::drop_active(&mut votes, &mut index, content, &viewer);

        votes.push(VoteRecord::new(content.clone(), viewer.clone(), kind));
        index.insert(content.clone(), kind);
        self.persist(&votes, &index)?;

        debug!(content = %content, viewer = %viewer, %kind, replaced, "vote cast");
        Ok(AggregateRating::from_votes(content, &votes))
    }

    fn retract_vote(&self, content: &ContentId) -> LedgerResult<AggregateRating> {
        let _guard = self.write_lock.lock().map_err(|_| LedgerError::Poisoned)?;
        let viewer = self.identity.get_or_create_viewer_id()?;

        let mut votes = self.load_votes()?;
        let mut index = self.load_index()?;
        let removed = Self::drop_active(&mut votes, &mut index, content, &viewer);
        self.persist(&votes, &index)?;

        debug!(content = %content, viewer = %viewer, removed, "vote retracted");
        Ok(AggregateRating::from_votes(content, &votes))
    }
}

impl RatingReader for RatingLedger {
    fn votes(&self) -> LedgerResult<Vec<VoteRecord>> {
        self.load_votes()
    }

    fn viewer_vote(&self, content: &ContentId) -> LedgerResult<Option<VoteKind>> {
        Ok(self.load_index()?.get(content).copied())
    }
}

impl std::fmt::Debug for RatingLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RatingLedger").finish_non_exhaustive()
    }
}
