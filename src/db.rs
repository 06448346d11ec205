use dotenv::dotenv;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::env;
use std::str::FromStr;

pub async fn establish_connection() -> Result<Pool<Sqlite>, sqlx::Error> {
    dotenv().ok();

    let database_url =
        env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://greasy_spoon.db".to_string());

    let options = SqliteConnectOptions::from_str(&database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .map_err(|e| {
            log::error!("Failed to create database pool: {:?}", e);
            e
        })?;

    init_schema(&pool).await?;

    Ok(pool)
}

// Tables are created on startup; there are no further migrations.
pub async fn init_schema(pool: &Pool<Sqlite>) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS events (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            spoon_name TEXT NOT NULL,
            date TEXT NOT NULL,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS ratings (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            event_id INTEGER,
            event_ease INTEGER,
            event_vibes INTEGER,
            spoon_vibes INTEGER,
            spoon_price INTEGER,
            spoon_portion INTEGER,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (event_id) REFERENCES events (id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

// Single shared connection so every statement in a test sees the same in-memory database.
#[cfg(test)]
pub async fn memory_pool() -> Pool<Sqlite> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("in-memory sqlite url")
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("in-memory sqlite pool");
    init_schema(&pool).await.expect("schema init");
    pool
}
