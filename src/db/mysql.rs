use std::time::Duration;

use sqlx::{
    mysql::{MySqlConnectOptions, MySqlPoolOptions},
    MySqlPool,
};

use crate::{config::Config, error::AppResult};

/// Builds connection options from the `DB_*` settings
pub fn connect_options(config: &Config) -> MySqlConnectOptions {
    MySqlConnectOptions::new()
        .host(&config.db_host)
        .port(config.db_port)
        .username(&config.db_user)
        .password(&config.db_password)
        .database(&config.db_database)
}

fn pool_options(config: &Config) -> MySqlPoolOptions {
    MySqlPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_acquire_timeout_secs))
}

/// Creates the MySQL connection pool
///
/// Opens one connection up front so a bad host or credentials fail at startup
/// instead of on the first request.
pub async fn create_pool(config: &Config) -> AppResult<MySqlPool> {
    let pool = pool_options(config)
        .connect_with(connect_options(config))
        .await?;

    tracing::info!(
        host = %config.db_host,
        database = %config.db_database,
        max_connections = config.db_max_connections,
        "Connected to MySQL"
    );

    Ok(pool)
}

/// Creates a pool that does not connect until the first acquire
pub fn create_lazy_pool(config: &Config) -> MySqlPool {
    pool_options(config).connect_lazy_with(connect_options(config))
}
