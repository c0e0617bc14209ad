//! Record types for the in-memory store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user. Immutable after registration, never deleted.
/// The password hash is excluded from serialization so the record can be
/// returned directly from handlers.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    /// UUIDv7
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// A post. Score is maintained by vote deltas, never recomputed from the
/// full ledger.
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    pub id: u64,
    pub author_id: String,
    pub author_username: String,
    pub title: String,
    pub content: Option<String>,
    pub url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub upvotes: i64,
    pub downvotes: i64,
    pub score: i64,
    pub comment_count: u64,
}

/// A comment on a post, optionally replying to another comment.
#[derive(Debug, Clone, Serialize)]
pub struct Comment {
    pub id: u64,
    pub post_id: u64,
    pub parent_comment_id: Option<u64>,
    pub author_id: String,
    pub author_username: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub upvotes: i64,
    pub downvotes: i64,
    pub score: i64,
}

/// A user's vote on a content item. `None` is the unvoted state and is
/// represented in the ledger by the absence of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteDirection {
    Up,
    Down,
    None,
}

impl VoteDirection {
    /// Contribution to the (upvotes, downvotes) counters.
    pub fn counters(self) -> (i64, i64) {
        match self {
            VoteDirection::Up => (1, 0),
            VoteDirection::Down => (0, 1),
            VoteDirection::None => (0, 0),
        }
    }
}

/// The content item a ledger entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoteTarget {
    Post(u64),
    Comment(u64),
}
