use clap::Parser;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Agora API server
#[derive(Parser, Serialize, Deserialize, Clone, Debug)]
#[command(name = "agora-server", version, about = "Minimal Reddit-style API server")]
pub struct Config {
    /// Port to listen on
    #[arg(long, env = "AGORA_PORT", default_value = "8000")]
    pub port: u16,

    /// Bind address
    #[arg(long, env = "AGORA_BIND_ADDRESS", default_value = "0.0.0.0")]
    pub bind_address: String,

    /// Path to TOML config file
    #[arg(long, default_value = "./agora.toml")]
    pub config: String,

    /// Enable structured JSON logging (for Docker/production)
    #[arg(long, env = "AGORA_JSON_LOGS")]
    pub json_logs: bool,

    /// Output a commented TOML config template and exit
    #[arg(long)]
    pub generate_config: bool,

    /// Access token lifetime in minutes
    #[arg(long, env = "AGORA_TOKEN_TTL_MINUTES", default_value = "30")]
    pub token_ttl_minutes: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            bind_address: "0.0.0.0".to_string(),
            config: "./agora.toml".to_string(),
            json_logs: false,
            generate_config: false,
            token_ttl_minutes: 30,
        }
    }
}

impl Config {
    /// Load config with layered precedence:
    /// built-in defaults < TOML file < env vars (AGORA_*) < CLI args
    pub fn load() -> Result<Self, figment::Error> {
        let cli = Config::parse();
        let config_path = cli.config.clone();

        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_path))
            .merge(Env::prefixed("AGORA_"))
            .merge(Serialized::defaults(cli))
            .extract()
    }
}

/// Generate a commented TOML config template
pub fn generate_config_template() -> String {
    r#"# Agora API Server Configuration
# Place this file at ./agora.toml or specify with --config <path>
# All settings can be overridden via environment variables (AGORA_PORT, etc.)
# or CLI flags (--port, etc.)

# Server port (default: 8000)
# port = 8000

# Bind address (default: 0.0.0.0 — all interfaces)
# bind_address = "0.0.0.0"

# Enable structured JSON logging for Docker/production
# json_logs = false

# Access token lifetime in minutes (default: 30)
# token_ttl_minutes = 30
"#
    .to_string()
}
