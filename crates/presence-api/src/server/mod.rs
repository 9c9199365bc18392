//! Server setup and initialization
//!
//! Picks the storage backends from configuration, builds the router and runs
//! it until a shutdown signal arrives.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use presence_cache::{
    EventHub, InMemorySessionStore, LocalEventPublisher, RedisEventPublisher, RedisPool,
    RedisSessionStore, Subscriber, SubscriberConfig, SubscriberHandle,
};
use presence_common::{AppConfig, AppError, JwtService};
use presence_core::IdGenerator;
use presence_db::{create_pool, run_migrations, InMemoryUserRepository, PgUserRepository};
use presence_service::ServiceContext;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::apply_middleware_with_config;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();
    let router = apply_middleware_with_config(
        create_router(&state),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    )?;

    Ok(router.merge(health_routes()).with_state(state))
}

/// Initialize all dependencies and create AppState
///
/// `DATABASE_URL=memory://` keeps users in process; without `REDIS_URL`
/// sessions and presence events stay in process too.
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let hub = EventHub::default();

    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
        config.jwt.refresh_token_expiry,
    ));

    let mut builder = ServiceContext::builder()
        .jwt_service(jwt_service)
        .id_generator(Arc::new(IdGenerator::new(config.id.worker_id)))
        .presence(config.presence.clone());

    if config.database.is_memory() {
        warn!("Using the in-memory user store; users are lost on restart");
        builder = builder.user_repo(Arc::new(InMemoryUserRepository::new()));
    } else {
        info!("Connecting to PostgreSQL...");
        let pool = create_pool(&presence_db::DatabaseConfig::from(&config.database))
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        run_migrations(&pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        info!("PostgreSQL ready");

        builder = builder
            .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
            .pool(pool);
    }

    match &config.redis {
        Some(redis_config) => {
            info!("Connecting to Redis...");
            let redis_pool =
                RedisPool::from_config(redis_config).map_err(|e| AppError::Cache(e.to_string()))?;
            builder = builder
                .session_repo(Arc::new(RedisSessionStore::new(redis_pool.clone())))
                .publisher(Arc::new(RedisEventPublisher::new(redis_pool.clone())))
                .redis_pool(redis_pool);
        }
        None => {
            warn!("REDIS_URL not set; sessions and presence events stay in this process");
            builder = builder
                .session_repo(Arc::new(InMemorySessionStore::new()))
                .publisher(Arc::new(LocalEventPublisher::new(hub.clone())));
        }
    }

    let service_context = builder
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config, hub))
}

/// Relay events from other instances into the local hub
fn spawn_subscriber(state: &AppState) -> Option<SubscriberHandle> {
    let config = state.config();
    if !config.presence.broadcast {
        return None;
    }
    config.redis.as_ref().map(|redis| {
        Subscriber::spawn(SubscriberConfig::new(&redis.url), state.hub().clone())
    })
}

/// Serve `app` on `listener` until ctrl-c or SIGTERM
pub async fn run_server(app: Router, listener: TcpListener) -> Result<(), AppError> {
    let addr = listener
        .local_addr()
        .map_err(|e| AppError::Config(format!("Listener has no address: {e}")))?;
    info!("Server listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid listen address: {e}")))?;

    let state = create_app_state(config).await?;
    let subscriber = spawn_subscriber(&state);
    let app = create_app(state)?;

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    let result = run_server(app, listener).await;

    if let Some(subscriber) = subscriber {
        subscriber.shutdown();
    }
    info!("Server stopped");
    result
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}
