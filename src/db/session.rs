use std::sync::Arc;

use sqlx::{pool::PoolConnection, MySql, MySqlConnection, MySqlPool};
use tokio::sync::{Mutex, MutexGuard};

use crate::{config::Config, error::AppResult};

/// Session variables applied each time a connection is checked out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    pub sql_mode: String,
    pub time_zone: String,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            sql_mode: "TRADITIONAL".to_string(),
            time_zone: "-08:00".to_string(),
        }
    }
}

impl From<&Config> for SessionOptions {
    fn from(config: &Config) -> Self {
        Self {
            sql_mode: config.db_sql_mode.clone(),
            time_zone: config.db_time_zone.clone(),
        }
    }
}

impl SessionOptions {
    /// Sets strict mode and the session time zone on `conn`
    pub async fn apply(&self, conn: &mut MySqlConnection) -> AppResult<()> {
        sqlx::query("SET SESSION sql_mode = ?")
            .bind(&self.sql_mode)
            .execute(&mut *conn)
            .await?;

        sqlx::query("SET time_zone = ?")
            .bind(&self.time_zone)
            .execute(&mut *conn)
            .await?;

        Ok(())
    }
}

/// A pooled connection checked out for the lifetime of one request
///
/// Cloned into request extensions; the connection goes back to the pool when
/// the last clone is dropped.
#[derive(Clone)]
pub struct DbSession {
    conn: Arc<Mutex<PoolConnection<MySql>>>,
}

impl DbSession {
    /// Acquires a connection and applies `options` to it
    ///
    /// If the options cannot be set the connection is dropped here, which
    /// returns it to the pool.
    pub async fn open(pool: &MySqlPool, options: &SessionOptions) -> AppResult<Self> {
        let mut conn = pool.acquire().await?;
        options.apply(&mut conn).await?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Exclusive access to the underlying connection
    pub async fn lock(&self) -> MutexGuard<'_, PoolConnection<MySql>> {
        self.conn.lock().await
    }
}

impl std::fmt::Debug for DbSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbSession").finish_non_exhaustive()
    }
}
