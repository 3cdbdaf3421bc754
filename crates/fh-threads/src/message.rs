use chrono::{DateTime, Utc};
use fh_types::MessageId;
use serde::{Deserialize, Serialize};

/// A single chat entry: either a reply, or the body of a top-level
/// [`Message`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: MessageId,
    /// Author display name.
    pub user: String,
    /// Body text, trimmed.
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub likes: u32,
    /// Whether the viewer of this profile liked it.
    pub liked: bool,
}

/// Replies carry no replies of their own.
pub type Reply = Comment;

impl Comment {
    pub fn new(user: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            user: user.into(),
            message: message.into(),
            timestamp: Utc::now(),
            likes: 0,
            liked: false,
        }
    }

    /// Flip the viewer's like and move the counter by one in the same
    /// direction. The counter never goes below zero.
    pub fn toggle_like(&mut self) {
        if self.liked {
            self.likes = self.likes.saturating_sub(1);
        } else {
            self.likes = self.likes.saturating_add(1);
        }
        self.liked = !self.liked;
    }
}

/// A top-level message of a thread.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(flatten)]
    pub comment: Comment,
    /// Older profiles omit the field on messages nobody replied to.
    #[serde(default)]
    pub replies: Vec<Reply>,
}

impl Message {
    pub fn new(user: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            comment: Comment::new(user, message),
            replies: Vec::new(),
        }
    }

    pub fn id(&self) -> &MessageId {
        &self.comment.id
    }

    pub fn reply_mut(&mut self, id: &MessageId) -> Option<&mut Reply> {
        self.replies.iter_mut().find(|r| &r.id == id)
    }
}

impl std::ops::Deref for Message {
    type Target = Comment;

    fn deref(&self) -> &Comment {
        &self.comment
    }
}

impl std::ops::DerefMut for Message {
    fn deref_mut(&mut self) -> &mut Comment {
        &mut self.comment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_message_starts_unliked() {
        let msg = Message::new("Ana", "Great show");
        assert_eq!(msg.likes, 0);
        assert!(!msg.liked);
        assert!(msg.replies.is_empty());
    }

    #[test]
    fn toggle_like_twice_restores() {
        let mut c = Comment::new("Ana", "hi");
        c.toggle_like();
        assert_eq!((c.likes, c.liked), (1, true));
        c.toggle_like();
        assert_eq!((c.likes, c.liked), (0, false));
    }

    #[test]
    fn unlike_never_goes_negative() {
        let mut c = Comment::new("Ana", "hi");
        c.liked = true;
        c.toggle_like();
        assert_eq!((c.likes, c.liked), (0, false));
    }

    #[test]
    fn message_serializes_flat() {
        let msg = Message::new("Ana", "hi");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["user"], "Ana");
        assert_eq!(json["message"], "hi");
        assert_eq!(json["likes"], 0);
        assert_eq!(json["liked"], false);
        assert!(json["replies"].as_array().unwrap().is_empty());
        assert!(json.get("comment").is_none());
        assert!(json["timestamp"].as_str().unwrap().contains('T'));
    }

    #[test]
    fn reply_has_no_replies_field() {
        let json = serde_json::to_value(Comment::new("Ana", "hi")).unwrap();
        assert!(json.get("replies").is_none());
    }

    #[test]
    fn reads_older_records() {
        let raw = r#"[{
            "id": "1700000000000",
            "user": "Bia",
            "message": "old",
            "timestamp": "2023-11-14T22:13:20.000Z",
            "likes": 2,
            "liked": true
        }]"#;
        let msgs: Vec<Message> = serde_json::from_str(raw).unwrap();
        assert_eq!(msgs[0].id().as_str(), "1700000000000");
        assert_eq!(msgs[0].likes, 2);
        assert!(msgs[0].replies.is_empty());
        assert_eq!(msgs[0].timestamp.timestamp(), 1_700_000_000);
    }
}
