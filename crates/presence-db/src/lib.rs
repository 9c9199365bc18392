//! # presence-db
//!
//! Persistence for users and their presence flag.
//!
//! - `PgUserRepository`: PostgreSQL via SQLx, schema under `migrations/`
//! - `InMemoryUserRepository`: process-local store selected with `DATABASE_URL=memory://`
//!
//! ```rust,ignore
//! use presence_db::{create_pool, run_migrations, DatabaseConfig, PgUserRepository};
//!
//! let pool = create_pool(&DatabaseConfig::from(&app_config.database)).await?;
//! run_migrations(&pool).await?;
//! let users = PgUserRepository::new(pool);
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, ping, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{InMemoryUserRepository, PgUserRepository};
