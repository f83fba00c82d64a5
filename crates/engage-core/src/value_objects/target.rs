//! Reaction target - the post or comment a reaction is attached to

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of content a reaction can be attached to
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Post,
    Comment,
}

impl TargetKind {
    /// Wire/storage representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Comment => "comment",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TargetKind {
    type Err = TargetKindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "post" => Ok(Self::Post),
            "comment" => Ok(Self::Comment),
            _ => Err(TargetKindParseError::Unknown(s.to_string())),
        }
    }
}

/// Error when parsing a TargetKind from its storage string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TargetKindParseError {
    #[error("unknown target kind: {0}")]
    Unknown(String),
}

/// Composite key addressing one reactable piece of content
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TargetRef {
    pub kind: TargetKind,
    pub id: i64,
}

impl TargetRef {
    /// Create a target reference
    #[inline]
    pub const fn new(kind: TargetKind, id: i64) -> Self {
        Self { kind, id }
    }

    /// Reference to a post
    #[inline]
    pub const fn post(id: i64) -> Self {
        Self::new(TargetKind::Post, id)
    }

    /// Reference to a comment
    #[inline]
    pub const fn comment(id: i64) -> Self {
        Self::new(TargetKind::Comment, id)
    }
}

impl fmt::Display for TargetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}
