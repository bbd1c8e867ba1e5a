//! Identifier newtypes for users and every governed entity.
//!
//! Numeric identifiers are monotonic and never reused; each entity collection
//! owns its own counter (post and comment ids are independent sequences).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A user identifier — an opaque, caller-chosen string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

macro_rules! numeric_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        pub struct $name(u64);

        impl $name {
            pub fn new(raw: u64) -> Self {
                Self(raw)
            }

            pub fn as_u64(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }
    };
}

numeric_id!(
    /// Identifier of a post.
    PostId
);
numeric_id!(
    /// Identifier of a comment (independent sequence from posts).
    CommentId
);
numeric_id!(
    /// Identifier of a governance proposal.
    ProposalId
);
numeric_id!(
    /// Identifier of a dispute.
    DisputeId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_ids_display_as_plain_integers() {
        assert_eq!(PostId::new(7).to_string(), "7");
        assert_eq!(DisputeId::new(42).to_string(), "42");
    }

    #[test]
    fn user_id_roundtrips_through_serde() {
        let id = UserId::new("alice");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"alice\"");
        let back: UserId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
