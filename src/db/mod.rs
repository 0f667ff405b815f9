mod recipes_repo;

pub use recipes_repo::{RecipesEntity, RecipesRepository, RECIPES_ROW_ID};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// File name of the cache database inside the data directory.
pub const DATABASE_NAME: &str = "recipes_database.db";

/// Errors from the local recipe cache.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Failed to create database directory '{0}': {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("Cached recipes are not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Initialize the database connection pool and run migrations
pub async fn init_db(path: &Path) -> Result<SqlitePool, CacheError> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| CacheError::CreateDir(parent.to_path_buf(), e))?;
    }

    let db_url = format!("sqlite:{}?mode=rwc", path.display());

    let options = SqliteConnectOptions::from_str(&db_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    tracing::debug!(path = %path.display(), "Recipe cache ready");

    Ok(pool)
}
