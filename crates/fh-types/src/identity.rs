use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Identifier of a cataloged content (kebab-case slug such as `"the-last-of-us"`).
///
/// Content ids are never validated against the catalog: ratings and threads
/// may exist for ids that have no catalog entry.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentId(String);

impl ContentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentId({})", self.0)
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContentId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl FromStr for ContentId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(TypeError::EmptyIdentifier);
        }
        Ok(Self::new(s))
    }
}

/// Length of the random suffix of a generated viewer id.
const VIEWER_SUFFIX_LEN: usize = 9;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Pseudo-anonymous identity of one local profile.
///
/// Format: `user_` followed by nine lowercase base-36 characters. Collisions
/// between profiles are possible in principle and accepted.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewerId(String);

impl ViewerId {
    /// Generate a fresh random viewer id.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let suffix: String = (0..VIEWER_SUFFIX_LEN)
            .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
            .collect();
        Self(format!("user_{suffix}"))
    }

    /// Wrap an existing identifier (e.g. one read back from a profile).
    pub fn from_raw(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ViewerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ViewerId({})", self.0)
    }
}

impl fmt::Display for ViewerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a comment or reply.
///
/// New ids are UUID v7 strings, so they sort by creation time. Threads
/// written by older clients carry millisecond-timestamp ids; both forms are
/// accepted as opaque strings.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(String);

impl MessageId {
    /// Generate a new time-ordered message id (UUID v7).
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().to_string())
    }

    pub fn from_raw(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short representation (first 8 characters).
    pub fn short_id(&self) -> &str {
        let end = self
            .0
            .char_indices()
            .nth(8)
            .map(|(i, _)| i)
            .unwrap_or(self.0.len());
        &self.0[..end]
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MessageId({})", self.short_id())
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for MessageId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(TypeError::EmptyIdentifier);
        }
        Ok(Self::from_raw(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_viewer_id_format() {
        let id = ViewerId::generate();
        let suffix = id.as_str().strip_prefix("user_").expect("user_ prefix");
        assert_eq!(suffix.len(), 9);
        assert!(suffix.bytes().all(|b| BASE36.contains(&b)));
    }

    #[test]
    fn generated_viewer_ids_differ() {
        assert_ne!(ViewerId::generate(), ViewerId::generate());
    }

    #[test]
    fn message_ids_are_unique_uuids() {
        let a = MessageId::new();
        let b = MessageId::new();
        assert_ne!(a, b);
        let parsed = uuid::Uuid::parse_str(a.as_str()).unwrap();
        assert_eq!(parsed.get_version_num(), 7);
    }

    #[test]
    fn short_id_handles_legacy_ids() {
        let legacy = MessageId::from_raw("1712345678901");
        assert_eq!(legacy.short_id(), "17123456");
        let tiny = MessageId::from_raw("42");
        assert_eq!(tiny.short_id(), "42");
    }

    #[test]
    fn content_id_parse_trims_and_rejects_empty() {
        let id: ContentId = "  matrix ".parse().unwrap();
        assert_eq!(id.as_str(), "matrix");
        assert_eq!("   ".parse::<ContentId>(), Err(TypeError::EmptyIdentifier));
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = ContentId::new("inception");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"inception\"");
        let parsed: ViewerId = serde_json::from_str("\"user_abc123xyz\"").unwrap();
        assert_eq!(parsed.as_str(), "user_abc123xyz");
    }
}
