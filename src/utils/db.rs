use std::str::FromStr;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::error::DatabaseError;
use sqlx::SqlitePool;
use crate::core::domain::Configuration;
use crate::core::library::{LibraryError, LibraryResult};

const CREATE_BOOKS_TABLE: &str = "CREATE TABLE IF NOT EXISTS books (
    isbn TEXT PRIMARY KEY,
    amazon_url TEXT NOT NULL,
    author TEXT NOT NULL,
    language TEXT NOT NULL,
    pages INTEGER NOT NULL,
    publisher TEXT NOT NULL,
    title TEXT NOT NULL,
    year INTEGER NOT NULL
)";

pub async fn build_pool(config: &Configuration) -> LibraryResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(config.database_url.as_str())?
        .create_if_missing(true);
    let in_memory = config.database_url.contains(":memory:");
    let mut pool_options = SqlitePoolOptions::new();
    if in_memory {
        // every connection to an in-memory database sees its own empty schema
        pool_options = pool_options.max_connections(1).idle_timeout(None).max_lifetime(None);
    }
    let pool = pool_options.connect_with(options).await?;
    tracing::info!(database_url = %config.database_url, in_memory, "connected to database");
    Ok(pool)
}

pub async fn create_books_table(pool: &SqlitePool) -> LibraryResult<()> {
    sqlx::query(CREATE_BOOKS_TABLE).execute(pool).await?;
    Ok(())
}

impl From<sqlx::Error> for LibraryError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => {
                LibraryError::not_found("no rows returned")
            }
            sqlx::Error::Database(ref db_err) if is_unique_violation(db_err.as_ref()) => {
                LibraryError::duplicate_key(db_err.message())
            }
            sqlx::Error::Database(ref db_err) => {
                LibraryError::database(db_err.message(), db_err.code().map(|c| c.to_string()))
            }
            sqlx::Error::Configuration(_) => {
                LibraryError::runtime(format!("invalid database configuration {}", err).as_str(), None)
            }
            _ => {
                LibraryError::database(format!("{}", err).as_str(), None)
            }
        }
    }
}

// sqlite reports primary key (1555) and unique (2067) violations with extended codes
fn is_unique_violation(db_err: &dyn DatabaseError) -> bool {
    db_err.is_unique_violation() || matches!(db_err.code().as_deref(), Some("1555") | Some("2067"))
}

#[cfg(test)]
pub(crate) async fn build_test_pool() -> SqlitePool {
    let pool = build_pool(&Configuration::for_tests()).await.expect("should open in-memory database");
    create_books_table(&pool).await.expect("should create books table");
    pool
}
