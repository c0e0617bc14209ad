use axum::{middleware, Json, Router};

use crate::auth::login;
use crate::auth::middleware::JwtSecret;
use crate::comments::crud as comment_crud;
use crate::posts::crud as post_crud;
use crate::state::AppState;
use crate::users::registration;
use crate::votes::cast as vote_cast;

/// GET / — Welcome message, mirrors the API description.
async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Welcome to the Agora API"
    }))
}

/// Inject the JWT secret into request extensions so the Claims extractor can find it.
async fn inject_jwt_secret(
    axum::extract::State(state): axum::extract::State<AppState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: middleware::Next,
) -> axum::response::Response {
    req.extensions_mut()
        .insert(JwtSecret(state.jwt_secret.clone()));
    next.run(req).await
}

/// Build the full axum Router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    // Account routes (no auth required)
    let account_routes = Router::new()
        .route("/register", axum::routing::post(registration::register))
        .route("/token", axum::routing::post(login::login));

    // Authenticated user routes (JWT required — Claims extractor validates token)
    let user_routes = Router::new().route("/users/me", axum::routing::get(registration::me));

    // Post routes: reads are public, mutations require auth via the Claims
    // extractor on each handler.
    let post_routes = Router::new()
        .route("/posts", axum::routing::get(post_crud::list_posts))
        .route("/posts", axum::routing::post(post_crud::create_post))
        .route("/posts/{id}", axum::routing::get(post_crud::get_post))
        .route("/posts/{id}", axum::routing::put(post_crud::update_post))
        .route("/posts/{id}", axum::routing::delete(post_crud::delete_post))
        .route(
            "/posts/{id}/vote",
            axum::routing::post(vote_cast::vote_on_post),
        );

    let comment_routes = Router::new()
        .route(
            "/posts/{id}/comments",
            axum::routing::get(comment_crud::list_comments),
        )
        .route(
            "/posts/{id}/comments",
            axum::routing::post(comment_crud::create_comment),
        )
        .route(
            "/comments/{id}/vote",
            axum::routing::post(vote_cast::vote_on_comment),
        );

    // Health check
    let health = Router::new().route("/health", axum::routing::get(health_check));

    Router::new()
        .route("/", axum::routing::get(root))
        .merge(account_routes)
        .merge(user_routes)
        .merge(post_routes)
        .merge(comment_routes)
        .merge(health)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            inject_jwt_secret,
        ))
        .with_state(state)
}

/// Basic health check endpoint
async fn health_check() -> &'static str {
    "ok"
}
