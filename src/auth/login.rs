use axum::{extract::State, http::StatusCode, Form, Json};
use serde::{Deserialize, Serialize};

use crate::auth::{jwt, password};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// POST /token
/// Form-encoded credential login. Unknown username and wrong password are
/// indistinguishable to the caller.
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<TokenResponse>, (StatusCode, String)> {
    let unauthorized = || {
        (
            StatusCode::UNAUTHORIZED,
            "Incorrect username or password".to_string(),
        )
    };

    let user = state.store.get_user(&form.username).ok_or_else(unauthorized)?;

    // Argon2 verification is CPU-bound
    let password_ok = tokio::task::spawn_blocking({
        let hash = user.password_hash.clone();
        let candidate = form.password.clone();
        move || password::verify_password(&candidate, &hash)
    })
    .await
    .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    if !password_ok {
        tracing::debug!(username = %form.username, "login rejected");
        return Err(unauthorized());
    }

    let access_token = jwt::issue_access_token(
        &state.jwt_secret,
        &user.username,
        state.token_ttl_minutes,
    )
    .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    tracing::info!(username = %user.username, "login succeeded");
    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}
