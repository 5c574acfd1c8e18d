use std::str::FromStr;

use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use tracing::info;

/// Creates and returns a PostgreSQL connection pool.
/// `db_name`, when given, replaces the database named in the URL.
pub async fn create_pool(database_url: &str, db_name: Option<&str>) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let mut options =
        PgConnectOptions::from_str(database_url).context("DATABASE_URL is not a valid URL")?;
    if let Some(name) = db_name {
        options = options.database(name);
    }

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect_with(options)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}
