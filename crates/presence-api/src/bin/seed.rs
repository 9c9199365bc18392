//! Populate the user store with synthetic users
//!
//! ```bash
//! SEED_USER_COUNT=20 SEED_PASSWORD=password cargo run -p presence-api --bin presence-seed
//! ```

use presence_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use presence_service::{SeedService, DEFAULT_SEED_COUNT};
use tracing::{error, info, warn};

const DEFAULT_SEED_PASSWORD: &str = "password";

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

    if let Err(e) = seed(config).await {
        error!(error = %e, "Seeding failed");
        std::process::exit(1);
    }
}

async fn seed(config: AppConfig) -> anyhow::Result<()> {
    let count = match std::env::var("SEED_USER_COUNT") {
        Ok(raw) => raw.parse::<usize>()?,
        Err(_) => DEFAULT_SEED_COUNT,
    };
    let password =
        std::env::var("SEED_PASSWORD").unwrap_or_else(|_| DEFAULT_SEED_PASSWORD.to_string());

    if config.database.is_memory() {
        warn!("DATABASE_URL is memory://; seeded users vanish when this process exits");
    }

    let state = presence_api::create_app_state(config).await?;
    let report = SeedService::new(state.service_context())
        .seed(count, &password)
        .await?;

    info!(
        created = report.created,
        skipped = report.skipped,
        "Seed complete"
    );
    Ok(())
}
