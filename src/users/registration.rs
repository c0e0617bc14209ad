use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use crate::auth::middleware::{current_user, Claims};
use crate::auth::password;
use crate::state::AppState;
use crate::store::models::User;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// POST /register
/// Create a new user. Usernames are unique; a taken name is a conflict.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<User>, (StatusCode, String)> {
    let username = req.username.trim();
    if username.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "Username cannot be empty".to_string(),
        ));
    }
    if !req.email.contains('@') {
        return Err((
            StatusCode::BAD_REQUEST,
            "Invalid email address".to_string(),
        ));
    }
    if req.password.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "Password cannot be empty".to_string(),
        ));
    }

    // Cheap pre-check so we don't hash for a name that's already taken.
    // create_user re-checks atomically below.
    if state.store.get_user(username).is_some() {
        return Err((
            StatusCode::CONFLICT,
            "Username already exists".to_string(),
        ));
    }

    // Argon2 hashing is CPU-bound
    let password_hash = tokio::task::spawn_blocking({
        let plaintext = req.password.clone();
        move || password::hash_password(&plaintext)
    })
    .await
    .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
    .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    let user = state
        .store
        .create_user(username, &req.email, password_hash)
        .ok_or((
            StatusCode::CONFLICT,
            "Username already exists".to_string(),
        ))?;

    tracing::info!(username = %user.username, user_id = %user.id, "user registered");
    Ok(Json(user))
}

/// GET /users/me
/// Return the authenticated user's own record.
pub async fn me(
    State(state): State<AppState>,
    claims: Claims,
) -> Result<Json<User>, (StatusCode, String)> {
    let user = current_user(&state, &claims)?;
    Ok(Json(user))
}
