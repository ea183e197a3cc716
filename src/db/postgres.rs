use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::error::AppResult;

#[cfg(test)]
use mockall::automock;

/// Creates a PostgreSQL connection pool
///
/// Establishes a pool of database connections for efficient reuse.
/// The pool automatically manages connection lifecycle and limits.
pub async fn create_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Read-only seam to the wishlist persistence owned by the site's account
/// subsystem. This core only ever asks one question of it.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait WishlistStore: Send + Sync {
    /// Whether the user has already saved this movie.
    async fn exists(&self, user_id: i64, movie_id: i64) -> AppResult<bool>;
}

/// Postgres-backed wishlist lookup.
pub struct PgWishlistStore {
    pool: PgPool,
}

impl PgWishlistStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl WishlistStore for PgWishlistStore {
    async fn exists(&self, user_id: i64, movie_id: i64) -> AppResult<bool> {
        let row: Option<(i64,)> = sqlx::query_as(
            "SELECT id FROM movie_wishlist WHERE user_id = $1 AND movie_id = $2",
        )
        .bind(user_id)
        .bind(movie_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.is_some())
    }
}
