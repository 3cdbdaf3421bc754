use std::sync::{Arc, Mutex, MutexGuard};

use fh_store::{load_json, save_json, KeyValueStore};
use fh_types::{ContentId, MessageId};
use tracing::{debug, warn};

use crate::error::{ThreadError, ThreadResult};
use crate::keys;
use crate::message::{Comment, Message, Reply};

/// Store-backed comment threads, one per content id.
///
/// Every mutation loads the whole thread, edits it and writes it back before
/// returning. Threads found only under the legacy key are served as-is and
/// moved to the current key on their first write.
pub struct CommentThreadStore {
    pub(crate) store: Arc<dyn KeyValueStore>,
    write_lock: Mutex<()>,
}

impl CommentThreadStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Messages of `content`, oldest first. Empty when nothing was posted.
    pub fn thread(&self, content: &ContentId) -> ThreadResult<Vec<Message>> {
        if let Some(current) = load_json(self.store.as_ref(), &keys::thread_key(content))? {
            return Ok(current);
        }
        let legacy = keys::legacy_thread_key(content);
        if legacy == keys::DISPLAY_NAME {
            return Ok(Vec::new());
        }
        Ok(load_json(self.store.as_ref(), &legacy)?.unwrap_or_default())
    }

    /// Append a top-level message. Returns `None` without writing when the
    /// body is blank.
    pub fn post_message(
        &self,
        content: &ContentId,
        author: &str,
        body: &str,
    ) -> ThreadResult<Option<Message>> {
        let body = body.trim();
        if body.is_empty() {
            return Ok(None);
        }
        let author = validate_author(author)?;

        let _guard = self.lock()?;
        let mut thread = self.thread(content)?;
        let message = Message::new(author, body);
        thread.push(message.clone());
        self.save(content, &thread)?;

        debug!(content = %content, id = %message.id(), "message posted");
        Ok(Some(message))
    }

    /// Append a reply under the top-level message `parent`.
    ///
    /// Returns `None` without writing when the body is blank. Replies to
    /// replies are not possible: `parent` must be a top-level message.
    pub fn post_reply(
        &self,
        content: &ContentId,
        parent: &MessageId,
        author: &str,
        body: &str,
    ) -> ThreadResult<Option<Reply>> {
        let body = body.trim();
        if body.is_empty() {
            return Ok(None);
        }
        let author = validate_author(author)?;

        let _guard = self.lock()?;
        let mut thread = self.thread(content)?;
        let target = thread
            .iter_mut()
            .find(|m| m.id() == parent)
            .ok_or_else(|| not_found(content, parent))?;
        let reply = Comment::new(author, body);
        target.replies.push(reply.clone());
        self.save(content, &thread)?;

        debug!(content = %content, parent = %parent, id = %reply.id, "reply posted");
        Ok(Some(reply))
    }

    /// Flip the viewer's like on a message, or on a reply when `parent` is
    /// given. Returns the updated entry.
    pub fn toggle_like(
        &self,
        content: &ContentId,
        id: &MessageId,
        parent: Option<&MessageId>,
    ) -> ThreadResult<Comment> {
        let _guard = self.lock()?;
        let mut thread = self.thread(content)?;

        let target: &mut Comment = match parent {
            Some(parent) => thread
                .iter_mut()
                .find(|m| m.id() == parent)
                .and_then(|m| m.reply_mut(id))
                .ok_or_else(|| not_found(content, id))?,
            None => thread
                .iter_mut()
                .find(|m| m.id() == id)
                .map(|m| &mut m.comment)
                .ok_or_else(|| not_found(content, id))?,
        };
        target.toggle_like();
        let updated = target.clone();
        self.save(content, &thread)?;

        debug!(content = %content, id = %id, liked = updated.liked, "like toggled");
        Ok(updated)
    }

    /// Write under the current key and drop the legacy `chat_<id>` copy.
    /// The migration is one-way.
    fn save(&self, content: &ContentId, thread: &[Message]) -> ThreadResult<()> {
        save_json(self.store.as_ref(), &keys::thread_key(content), thread)?;
        let legacy = keys::legacy_thread_key(content);
        if legacy != keys::DISPLAY_NAME && self.store.remove(&legacy)? {
            warn!(content = %content, "migrated legacy chat thread");
        }
        Ok(())
    }

    fn lock(&self) -> ThreadResult<MutexGuard<'_, ()>> {
        self.write_lock.lock().map_err(|_| ThreadError::Poisoned)
    }
}

fn validate_author(author: &str) -> ThreadResult<&str> {
    let author = author.trim();
    if author.is_empty() {
        return Err(ThreadError::EmptyAuthor);
    }
    Ok(author)
}

fn not_found(content: &ContentId, id: &MessageId) -> ThreadError {
    ThreadError::MessageNotFound {
        content_id: content.clone(),
        message_id: id.clone(),
    }
}

impl std::fmt::Debug for CommentThreadStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommentThreadStore").finish_non_exhaustive()
    }
}
