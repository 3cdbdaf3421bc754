use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// A viewer's opinion of a content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteKind {
    Like,
    Dislike,
}

impl VoteKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Dislike => "dislike",
        }
    }

    pub fn is_like(&self) -> bool {
        matches!(self, Self::Like)
    }
}

impl fmt::Display for VoteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoteKind {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "like" | "up" | "+" => Ok(Self::Like),
            "dislike" | "down" | "-" => Ok(Self::Dislike),
            other => Err(TypeError::InvalidVoteKind(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_aliases() {
        assert_eq!("Like".parse::<VoteKind>().unwrap(), VoteKind::Like);
        assert_eq!("down".parse::<VoteKind>().unwrap(), VoteKind::Dislike);
        assert!(matches!(
            "meh".parse::<VoteKind>(),
            Err(TypeError::InvalidVoteKind(_))
        ));
    }

    #[test]
    fn serde_uses_lowercase() {
        assert_eq!(serde_json::to_string(&VoteKind::Dislike).unwrap(), "\"dislike\"");
        let kind: VoteKind = serde_json::from_str("\"like\"").unwrap();
        assert!(kind.is_like());
    }
}
