//! Integration tests for the vote ledger: delta-based score maintenance,
//! idempotent re-casts, retraction, and the end-to-end scenario.

use std::sync::Arc;

use serde_json::json;
use tokio::net::TcpListener;

/// Helper: start the server on a random port and return the base URL.
async fn start_test_server() -> String {
    let state = agora_server::state::AppState {
        store: Arc::new(agora_server::store::Store::new()),
        jwt_secret: agora_server::auth::jwt::generate_jwt_secret(),
        token_ttl_minutes: 30,
    };
    let app = agora_server::routes::build_router(state);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

/// Helper: register a user and return a bearer token for them.
async fn register_and_login(client: &reqwest::Client, base_url: &str, username: &str) -> String {
    let resp = client
        .post(format!("{}/register", base_url))
        .json(&json!({
            "username": username,
            "email": format!("{}@example.com", username),
            "password": "hunter22",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200, "registration failed");

    let resp = client
        .post(format!("{}/token", base_url))
        .form(&[("username", username), ("password", "hunter22")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200, "login failed");
    let body: serde_json::Value = resp.json().await.unwrap();
    body["access_token"].as_str().unwrap().to_string()
}

async fn create_post(client: &reqwest::Client, base_url: &str, token: &str) -> u64 {
    let resp = client
        .post(format!("{}/posts", base_url))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({"title": "a post"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let post: serde_json::Value = resp.json().await.unwrap();
    post["id"].as_u64().unwrap()
}

async fn vote_on_post(
    client: &reqwest::Client,
    base_url: &str,
    token: &str,
    post_id: u64,
    direction: &str,
) -> serde_json::Value {
    let resp = client
        .post(format!("{}/posts/{}/vote", base_url, post_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({"direction": direction}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200, "vote failed");
    resp.json().await.unwrap()
}

#[tokio::test]
async fn test_upvote_then_downvote_moves_score_by_two() {
    let base_url = start_test_server().await;
    let client = reqwest::Client::new();
    let token = register_and_login(&client, &base_url, "alice").await;
    let post_id = create_post(&client, &base_url, &token).await;

    let post = vote_on_post(&client, &base_url, &token, post_id, "up").await;
    assert_eq!(post["score"], 1);
    assert_eq!(post["upvotes"], 1);
    assert_eq!(post["downvotes"], 0);

    let post = vote_on_post(&client, &base_url, &token, post_id, "down").await;
    assert_eq!(post["score"], -1);
    assert_eq!(post["upvotes"], 0);
    assert_eq!(post["downvotes"], 1);
}

#[tokio::test]
async fn test_same_direction_recast_is_idempotent() {
    let base_url = start_test_server().await;
    let client = reqwest::Client::new();
    let token = register_and_login(&client, &base_url, "alice").await;
    let post_id = create_post(&client, &base_url, &token).await;

    vote_on_post(&client, &base_url, &token, post_id, "up").await;
    let post = vote_on_post(&client, &base_url, &token, post_id, "up").await;
    assert_eq!(post["score"], 1);
    assert_eq!(post["upvotes"], 1);
}

#[tokio::test]
async fn test_none_retracts_vote() {
    let base_url = start_test_server().await;
    let client = reqwest::Client::new();
    let token = register_and_login(&client, &base_url, "alice").await;
    let post_id = create_post(&client, &base_url, &token).await;

    vote_on_post(&client, &base_url, &token, post_id, "down").await;
    let post = vote_on_post(&client, &base_url, &token, post_id, "none").await;
    assert_eq!(post["score"], 0);
    assert_eq!(post["downvotes"], 0);

    // Retracting with no standing vote is a no-op
    let post = vote_on_post(&client, &base_url, &token, post_id, "none").await;
    assert_eq!(post["score"], 0);
}

#[tokio::test]
async fn test_vote_requires_auth_and_existing_target() {
    let base_url = start_test_server().await;
    let client = reqwest::Client::new();
    let token = register_and_login(&client, &base_url, "alice").await;
    let post_id = create_post(&client, &base_url, &token).await;

    // No token
    let resp = client
        .post(format!("{}/posts/{}/vote", base_url, post_id))
        .json(&json!({"direction": "up"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    // Missing post
    let resp = client
        .post(format!("{}/posts/9999/vote", base_url))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({"direction": "up"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    // Unknown direction fails deserialization
    let resp = client
        .post(format!("{}/posts/{}/vote", base_url, post_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({"direction": "sideways"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 422);
}

#[tokio::test]
async fn test_comment_votes() {
    let base_url = start_test_server().await;
    let client = reqwest::Client::new();
    let alice = register_and_login(&client, &base_url, "alice").await;
    let bob = register_and_login(&client, &base_url, "bob").await;
    let post_id = create_post(&client, &base_url, &alice).await;

    let resp = client
        .post(format!("{}/posts/{}/comments", base_url, post_id))
        .header("Authorization", format!("Bearer {}", alice))
        .json(&json!({"content": "vote on me"}))
        .send()
        .await
        .unwrap();
    let comment: serde_json::Value = resp.json().await.unwrap();
    let comment_id = comment["id"].as_u64().unwrap();

    // Two users' votes accumulate
    for token in [&alice, &bob] {
        let resp = client
            .post(format!("{}/comments/{}/vote", base_url, comment_id))
            .header("Authorization", format!("Bearer {}", token))
            .json(&json!({"direction": "up"}))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
    }

    let comments: Vec<serde_json::Value> = client
        .get(format!("{}/posts/{}/comments", base_url, post_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(comments[0]["score"], 2);
}

/// The full teaching scenario: register alice, login, create a post, see it
/// listed at score 0, upvote it, see score 1.
#[tokio::test]
async fn test_end_to_end_alice() {
    let base_url = start_test_server().await;
    let client = reqwest::Client::new();

    let token = register_and_login(&client, &base_url, "alice").await;

    let resp = client
        .post(format!("{}/posts", base_url))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({"title": "hello agora", "url": "https://example.com"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let post: serde_json::Value = resp.json().await.unwrap();
    let post_id = post["id"].as_u64().unwrap();

    let posts: Vec<serde_json::Value> = client
        .get(format!("{}/posts", base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["id"].as_u64().unwrap(), post_id);
    assert_eq!(posts[0]["score"], 0);

    let post = vote_on_post(&client, &base_url, &token, post_id, "up").await;
    assert_eq!(post["score"], 1);
}
