//! Profile keys owned by the comment threads.

use fh_types::ContentId;

/// The chat display name of the profile.
pub const DISPLAY_NAME: &str = "chat_username";

const THREAD_PREFIX: &str = "comments_";
const LEGACY_THREAD_PREFIX: &str = "chat_";

/// Key of the thread of `content`.
pub fn thread_key(content: &ContentId) -> String {
    format!("{THREAD_PREFIX}{content}")
}

/// Key older profiles stored the thread of `content` under.
pub fn legacy_thread_key(content: &ContentId) -> String {
    format!("{LEGACY_THREAD_PREFIX}{content}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_prefixed_with_content_id() {
        let id = ContentId::new("stranger-things");
        assert_eq!(thread_key(&id), "comments_stranger-things");
        assert_eq!(legacy_thread_key(&id), "chat_stranger-things");
    }

    #[test]
    fn display_name_key_is_not_a_thread_key() {
        // A content id of "username" would collide with the display name
        // under the legacy scheme but not under the current one.
        assert_ne!(thread_key(&ContentId::new("username")), DISPLAY_NAME);
    }
}
