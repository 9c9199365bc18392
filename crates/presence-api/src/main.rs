//! Presence board server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p presence-api
//! ```
//!
//! Configuration is loaded from environment variables (and `.env`).

use presence_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        app = %config.app.name,
        env = ?config.app.env,
        port = config.api.port,
        "Starting presence board"
    );

    if let Err(e) = presence_api::run(config).await {
        error!(error = %e, "Server failed");
        std::process::exit(1);
    }
}
