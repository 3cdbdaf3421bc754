use std::sync::{Arc, Mutex};

use fh_store::KeyValueStore;
use fh_types::ViewerId;
use tracing::debug;

use crate::error::{LedgerError, LedgerResult};
use crate::keys;

/// Lazily creates and persists the viewer id of a profile.
///
/// The provider is the only writer of the viewer id key. The id is created
/// on the first call and never rotated afterwards.
pub struct IdentityProvider {
    store: Arc<dyn KeyValueStore>,
    create_lock: Mutex<()>,
}

impl IdentityProvider {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            create_lock: Mutex::new(()),
        }
    }

    /// Return the persisted viewer id, creating and storing one on first use.
    pub fn get_or_create_viewer_id(&self) -> LedgerResult<ViewerId> {
        let _guard = self.create_lock.lock().map_err(|_| LedgerError::Poisoned)?;
        if let Some(existing) = self.store.get(keys::VIEWER_ID)? {
            return Ok(ViewerId::from_raw(existing));
        }
        let created = ViewerId::generate();
        self.store.set(keys::VIEWER_ID, created.as_str())?;
        debug!(viewer = %created, "created viewer id");
        Ok(created)
    }

    /// The persisted viewer id, without creating one.
    pub fn current(&self) -> LedgerResult<Option<ViewerId>> {
        Ok(self.store.get(keys::VIEWER_ID)?.map(ViewerId::from_raw))
    }
}

impl std::fmt::Debug for IdentityProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityProvider").finish_non_exhaustive()
    }
}
