mod auth;
mod comments;
mod config;
mod posts;
mod routes;
mod state;
mod store;
mod users;
mod votes;

use std::sync::Arc;

use tokio::net::TcpListener;

use config::{generate_config_template, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load config with layered precedence: defaults < TOML < env < CLI
    let config = Config::load()?;

    // Handle --generate-config: print template and exit
    if config.generate_config {
        print!("{}", generate_config_template());
        return Ok(());
    }

    // Initialize tracing/logging
    if config.json_logs {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "agora_server=info".parse().unwrap()),
            )
            .init();
    } else {
        tracing_subscriber::fmt()
            .pretty()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "agora_server=info".parse().unwrap()),
            )
            .init();
    }

    tracing::info!("Agora server v{} starting", env!("CARGO_PKG_VERSION"));

    // The store lives in memory only: every boot starts empty, and the JWT
    // secret is regenerated so stale tokens die with the old process.
    let app_state = state::AppState {
        store: Arc::new(store::Store::new()),
        jwt_secret: auth::jwt::generate_jwt_secret(),
        token_ttl_minutes: config.token_ttl_minutes,
    };

    // Build router
    let app = routes::build_router(app_state);

    // Bind and serve
    let addr = format!("{}:{}", config.bind_address, config.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
