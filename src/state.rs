use std::sync::Arc;

use crate::store::Store;

/// Shared application state passed to all handlers via axum State extractor.
#[derive(Clone)]
pub struct AppState {
    /// In-memory store for users, posts, comments, and the vote ledger
    pub store: Arc<Store>,
    /// JWT signing secret (256-bit random key, regenerated each boot)
    pub jwt_secret: Vec<u8>,
    /// Access token lifetime in minutes
    pub token_ttl_minutes: i64,
}
