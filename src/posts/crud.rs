use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::auth::middleware::{current_user, Claims};
use crate::state::AppState;
use crate::store::models::Post;

// --- Request types ---

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
}

// --- Handlers ---

/// POST /posts
pub async fn create_post(
    State(state): State<AppState>,
    claims: Claims,
    Json(req): Json<CreatePostRequest>,
) -> Result<Json<Post>, (StatusCode, String)> {
    let user = current_user(&state, &claims)?;

    if req.title.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "Title cannot be empty".to_string(),
        ));
    }

    let post = state.store.create_post(&user, req.title, req.content, req.url);
    tracing::info!(post_id = post.id, author = %user.username, "post created");
    Ok(Json(post))
}

/// GET /posts — public, unpaginated, insertion-ordered.
pub async fn list_posts(State(state): State<AppState>) -> Json<Vec<Post>> {
    Json(state.store.list_posts())
}

/// GET /posts/{id} — public.
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Post>, (StatusCode, String)> {
    state
        .store
        .get_post(id)
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "Post not found".to_string()))
}

/// PUT /posts/{id} — partial update of title/content, author only.
pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    claims: Claims,
    Json(req): Json<UpdatePostRequest>,
) -> Result<Json<Post>, (StatusCode, String)> {
    let user = current_user(&state, &claims)?;

    let post = state
        .store
        .get_post(id)
        .ok_or((StatusCode::NOT_FOUND, "Post not found".to_string()))?;

    if post.author_id != user.id {
        return Err((
            StatusCode::FORBIDDEN,
            "Not authorized to edit this post".to_string(),
        ));
    }

    if let Some(title) = &req.title {
        if title.trim().is_empty() {
            return Err((
                StatusCode::BAD_REQUEST,
                "Title cannot be empty".to_string(),
            ));
        }
    }

    let updated = state
        .store
        .update_post(id, req.title, req.content)
        .ok_or((StatusCode::NOT_FOUND, "Post not found".to_string()))?;

    Ok(Json(updated))
}

/// DELETE /posts/{id} — author only, cascades to the post's comments.
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    claims: Claims,
) -> Result<Json<DeleteResponse>, (StatusCode, String)> {
    let user = current_user(&state, &claims)?;

    let post = state
        .store
        .get_post(id)
        .ok_or((StatusCode::NOT_FOUND, "Post not found".to_string()))?;

    if post.author_id != user.id {
        return Err((
            StatusCode::FORBIDDEN,
            "Not authorized to delete this post".to_string(),
        ));
    }

    state.store.delete_post(id);
    tracing::info!(post_id = id, author = %user.username, "post deleted");
    Ok(Json(DeleteResponse {
        message: "Post deleted successfully".to_string(),
    }))
}
