use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::auth::middleware::{current_user, Claims};
use crate::state::AppState;
use crate::store::models::Comment;

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
    /// Optional reply threading; must reference a comment on the same post.
    #[serde(default)]
    pub parent_comment_id: Option<u64>,
}

/// POST /posts/{id}/comments
pub async fn create_comment(
    State(state): State<AppState>,
    Path(post_id): Path<u64>,
    claims: Claims,
    Json(req): Json<CreateCommentRequest>,
) -> Result<Json<Comment>, (StatusCode, String)> {
    let user = current_user(&state, &claims)?;

    if req.content.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "Comment cannot be empty".to_string(),
        ));
    }

    if let Some(parent_id) = req.parent_comment_id {
        let parent = state.store.get_comment(parent_id).ok_or((
            StatusCode::BAD_REQUEST,
            "Parent comment does not exist".to_string(),
        ))?;
        if parent.post_id != post_id {
            return Err((
                StatusCode::BAD_REQUEST,
                "Parent comment belongs to a different post".to_string(),
            ));
        }
    }

    let comment = state
        .store
        .create_comment(post_id, req.parent_comment_id, &user, req.content)
        .ok_or((StatusCode::NOT_FOUND, "Post not found".to_string()))?;

    tracing::info!(
        comment_id = comment.id,
        post_id,
        author = %user.username,
        "comment created"
    );
    Ok(Json(comment))
}

/// GET /posts/{id}/comments — public, insertion-ordered.
/// An unknown post yields an empty list rather than 404.
pub async fn list_comments(
    State(state): State<AppState>,
    Path(post_id): Path<u64>,
) -> Json<Vec<Comment>> {
    Json(state.store.list_comments(post_id))
}
