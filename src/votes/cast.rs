use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::auth::middleware::{current_user, Claims};
use crate::state::AppState;
use crate::store::models::{Comment, Post, VoteDirection};

#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    /// "up", "down", or "none" (retract)
    pub direction: VoteDirection,
}

/// POST /posts/{id}/vote — upsert the caller's vote, respond with the
/// updated post.
pub async fn vote_on_post(
    State(state): State<AppState>,
    Path(post_id): Path<u64>,
    claims: Claims,
    Json(req): Json<VoteRequest>,
) -> Result<Json<Post>, (StatusCode, String)> {
    let user = current_user(&state, &claims)?;

    let post = state
        .store
        .vote_on_post(post_id, &user.id, req.direction)
        .ok_or((StatusCode::NOT_FOUND, "Post not found".to_string()))?;

    tracing::debug!(post_id, voter = %user.username, score = post.score, "post vote cast");
    Ok(Json(post))
}

/// POST /comments/{id}/vote — same semantics for comments.
pub async fn vote_on_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<u64>,
    claims: Claims,
    Json(req): Json<VoteRequest>,
) -> Result<Json<Comment>, (StatusCode, String)> {
    let user = current_user(&state, &claims)?;

    let comment = state
        .store
        .vote_on_comment(comment_id, &user.id, req.direction)
        .ok_or((StatusCode::NOT_FOUND, "Comment not found".to_string()))?;

    tracing::debug!(
        comment_id,
        voter = %user.username,
        score = comment.score,
        "comment vote cast"
    );
    Ok(Json(comment))
}
