use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

use crate::{api::error, ENV};

pub async fn connect_database(database_url: &str) -> Result<PgPool, error::SystemError> {
    let pool = PgPoolOptions::new()
        .max_connections(ENV.database_max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(ENV.upstream_timeout_secs))
        .acquire_slow_threshold(Duration::from_secs(3))
        .connect(database_url)
        .await?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| error::SystemError::DatabaseError(e.to_string().into()))?;
    log::info!("Database connected and migrations applied");
    Ok(pool)
}

/// Shared client for the user and text-chat services.
pub fn http_client(timeout: Duration) -> Result<reqwest::Client, error::SystemError> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}
