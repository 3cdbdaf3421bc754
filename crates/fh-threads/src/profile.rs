use tracing::debug;

use crate::error::ThreadResult;
use crate::keys;
use crate::store::CommentThreadStore;

impl CommentThreadStore {
    /// The chat display name, if one was set.
    pub fn display_name(&self) -> ThreadResult<Option<String>> {
        Ok(self.store.get(keys::DISPLAY_NAME)?)
    }

    /// Set the chat display name. Returns the stored (trimmed) name, or
    /// `None` without writing when `name` is blank.
    pub fn set_display_name(&self, name: &str) -> ThreadResult<Option<String>> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }
        self.store.set(keys::DISPLAY_NAME, name)?;
        debug!(name, "display name set");
        Ok(Some(name.to_string()))
    }
}
