pub mod models;

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

use self::models::{Comment, Post, User, VoteDirection, VoteTarget};

/// In-memory data store backing the whole API. DashMap gives per-entry
/// locking; there are no cross-entity transactions, so concurrent mutations
/// of the same item can interleave. Nothing survives a restart.
pub struct Store {
    /// Keyed by username, the unique login handle.
    users: DashMap<String, User>,
    posts: DashMap<u64, Post>,
    comments: DashMap<u64, Comment>,
    /// Vote ledger: at most one entry per (user, item). Absence means the
    /// user has not voted (the "none" state).
    votes: DashMap<(String, VoteTarget), VoteDirection>,
    next_post_id: AtomicU64,
    next_comment_id: AtomicU64,
}

impl Store {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            posts: DashMap::new(),
            comments: DashMap::new(),
            votes: DashMap::new(),
            next_post_id: AtomicU64::new(1),
            next_comment_id: AtomicU64::new(1),
        }
    }

    // --- Users ---

    /// Create a user. Returns None if the username is already taken.
    /// The entry API makes the existence check and insert atomic.
    pub fn create_user(&self, username: &str, email: &str, password_hash: String) -> Option<User> {
        match self.users.entry(username.to_string()) {
            Entry::Occupied(_) => None,
            Entry::Vacant(slot) => {
                let user = User {
                    id: Uuid::now_v7().to_string(),
                    username: username.to_string(),
                    email: email.to_string(),
                    password_hash,
                    created_at: Utc::now(),
                };
                slot.insert(user.clone());
                Some(user)
            }
        }
    }

    pub fn get_user(&self, username: &str) -> Option<User> {
        self.users.get(username).map(|u| u.value().clone())
    }

    // --- Posts ---

    pub fn create_post(
        &self,
        author: &User,
        title: String,
        content: Option<String>,
        url: Option<String>,
    ) -> Post {
        let id = self.next_post_id.fetch_add(1, Ordering::Relaxed);
        let post = Post {
            id,
            author_id: author.id.clone(),
            author_username: author.username.clone(),
            title,
            content,
            url,
            created_at: Utc::now(),
            upvotes: 0,
            downvotes: 0,
            score: 0,
            comment_count: 0,
        };
        self.posts.insert(id, post.clone());
        post
    }

    pub fn get_post(&self, id: u64) -> Option<Post> {
        self.posts.get(&id).map(|p| p.value().clone())
    }

    /// All posts in insertion order (ids are assigned sequentially).
    pub fn list_posts(&self) -> Vec<Post> {
        let mut posts: Vec<Post> = self.posts.iter().map(|p| p.value().clone()).collect();
        posts.sort_by_key(|p| p.id);
        posts
    }

    /// Partial update of title and/or content. Ownership is checked by the
    /// handler before calling.
    pub fn update_post(
        &self,
        id: u64,
        title: Option<String>,
        content: Option<String>,
    ) -> Option<Post> {
        let mut post = self.posts.get_mut(&id)?;
        if let Some(title) = title {
            post.title = title;
        }
        if let Some(content) = content {
            post.content = Some(content);
        }
        Some(post.clone())
    }

    /// Delete a post and cascade: its comments and every ledger entry
    /// referring to the post or those comments.
    pub fn delete_post(&self, post_id: u64) -> bool {
        if self.posts.remove(&post_id).is_none() {
            return false;
        }
        let removed: Vec<u64> = self
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .map(|c| c.id)
            .collect();
        for id in &removed {
            self.comments.remove(id);
        }
        self.votes.retain(|(_, target), _| match *target {
            VoteTarget::Post(id) => id != post_id,
            VoteTarget::Comment(id) => !removed.contains(&id),
        });
        true
    }

    // --- Comments ---

    /// Create a comment under an existing post, bumping its comment_count.
    /// Returns None if the post does not exist.
    pub fn create_comment(
        &self,
        post_id: u64,
        parent_comment_id: Option<u64>,
        author: &User,
        content: String,
    ) -> Option<Comment> {
        let mut post = self.posts.get_mut(&post_id)?;
        let id = self.next_comment_id.fetch_add(1, Ordering::Relaxed);
        let comment = Comment {
            id,
            post_id,
            parent_comment_id,
            author_id: author.id.clone(),
            author_username: author.username.clone(),
            content,
            created_at: Utc::now(),
            upvotes: 0,
            downvotes: 0,
            score: 0,
        };
        self.comments.insert(id, comment.clone());
        post.comment_count += 1;
        Some(comment)
    }

    pub fn get_comment(&self, id: u64) -> Option<Comment> {
        self.comments.get(&id).map(|c| c.value().clone())
    }

    /// Comments for a post in insertion order. An unknown post id yields an
    /// empty list, matching the public read surface of the listing endpoint.
    pub fn list_comments(&self, post_id: u64) -> Vec<Comment> {
        let mut comments: Vec<Comment> = self
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .map(|c| c.value().clone())
            .collect();
        comments.sort_by_key(|c| c.id);
        comments
    }

    // --- Vote ledger ---

    /// Upsert the (user, target) ledger entry and return the (upvotes,
    /// downvotes) counter deltas to apply: the old vote's contribution
    /// removed, the new one added. Re-casting the same direction nets to
    /// zero, as does "none" when no entry exists.
    fn ledger_update(
        &self,
        user_id: &str,
        target: VoteTarget,
        direction: VoteDirection,
    ) -> (i64, i64) {
        let key = (user_id.to_string(), target);
        let old = match direction {
            VoteDirection::None => self.votes.remove(&key).map(|(_, d)| d),
            _ => self.votes.insert(key, direction),
        };
        let (old_up, old_down) = old.unwrap_or(VoteDirection::None).counters();
        let (new_up, new_down) = direction.counters();
        (new_up - old_up, new_down - old_down)
    }

    pub fn vote_on_post(
        &self,
        post_id: u64,
        user_id: &str,
        direction: VoteDirection,
    ) -> Option<Post> {
        let mut post = self.posts.get_mut(&post_id)?;
        let (up, down) = self.ledger_update(user_id, VoteTarget::Post(post_id), direction);
        post.upvotes += up;
        post.downvotes += down;
        post.score = post.upvotes - post.downvotes;
        Some(post.clone())
    }

    pub fn vote_on_comment(
        &self,
        comment_id: u64,
        user_id: &str,
        direction: VoteDirection,
    ) -> Option<Comment> {
        let mut comment = self.comments.get_mut(&comment_id)?;
        let (up, down) = self.ledger_update(user_id, VoteTarget::Comment(comment_id), direction);
        comment.upvotes += up;
        comment.downvotes += down;
        comment.score = comment.upvotes - comment.downvotes;
        Some(comment.clone())
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
