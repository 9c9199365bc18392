//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use presence_core::traits::{RepoResult, UserRepository};
use presence_core::{DomainError, ProfileUpdate, User, UserId};

use crate::mappers::UserInsert;
use crate::models::UserModel;

use super::error::{map_db_error, map_unique_violation, user_not_found};

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a repository over the given pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get the underlying pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, name, email, busy, level, github_link, created_at, updated_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, name, email, busy, level, github_link, created_at, updated_at
            FROM users
            WHERE LOWER(email) = LOWER($1)
            ",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(email) = LOWER($1))
            ",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn list_except(&self, caller: UserId) -> RepoResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, name, email, busy, level, github_link, created_at, updated_at
            FROM users
            WHERE id <> $1
            ORDER BY id
            ",
        )
        .bind(caller.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    #[instrument(skip(self, user, password_hash), fields(user_id = %user.id))]
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        let row = UserInsert::new(user, password_hash);

        sqlx::query(
            r"
            INSERT INTO users (id, name, email, encrypted_password, busy, level, github_link, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(row.id)
        .bind(row.name)
        .bind(row.email)
        .bind(row.encrypted_password)
        .bind(row.busy)
        .bind(row.level)
        .bind(row.github_link)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::EmailAlreadyExists))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_profile(&self, id: UserId, update: &ProfileUpdate) -> RepoResult<User> {
        let row = sqlx::query_as::<_, UserModel>(
            r"
            UPDATE users
            SET name = COALESCE($2, name),
                level = COALESCE($3, level),
                github_link = COALESCE($4, github_link),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, email, busy, level, github_link, created_at, updated_at
            ",
        )
        .bind(id.into_inner())
        .bind(update.name.as_deref())
        .bind(update.level.as_deref())
        .bind(update.github_link.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        row.map(User::from).ok_or_else(|| user_not_found(id))
    }

    #[instrument(skip(self))]
    async fn toggle_presence(&self, id: UserId) -> RepoResult<User> {
        // Single statement: concurrent toggles each flip exactly once.
        let row = sqlx::query_as::<_, UserModel>(
            r"
            UPDATE users
            SET busy = NOT busy, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, email, busy, level, github_link, created_at, updated_at
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        row.map(User::from).ok_or_else(|| user_not_found(id))
    }

    #[instrument(skip(self))]
    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>> {
        sqlx::query_scalar::<_, String>(
            r"
            SELECT encrypted_password FROM users WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn count(&self) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }
}
