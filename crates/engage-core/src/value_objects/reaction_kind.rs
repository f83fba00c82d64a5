//! Reaction kind - the affective responses a user can attach to a target

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the five supported reaction types
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Like,
    Love,
    Laugh,
    Sad,
    Angry,
}

impl ReactionKind {
    /// Every kind, in display order
    pub const ALL: [ReactionKind; 5] = [
        Self::Like,
        Self::Love,
        Self::Laugh,
        Self::Sad,
        Self::Angry,
    ];

    /// Wire/storage representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Love => "love",
            Self::Laugh => "laugh",
            Self::Sad => "sad",
            Self::Angry => "angry",
        }
    }
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReactionKind {
    type Err = ReactionKindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "like" => Ok(Self::Like),
            "love" => Ok(Self::Love),
            "laugh" => Ok(Self::Laugh),
            "sad" => Ok(Self::Sad),
            "angry" => Ok(Self::Angry),
            _ => Err(ReactionKindParseError::Unknown(s.to_string())),
        }
    }
}

/// Error when parsing a ReactionKind from its storage string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReactionKindParseError {
    #[error("unknown reaction kind: {0}")]
    Unknown(String),
}
