use sqlx::MySqlPool;

use crate::db::SessionOptions;

/// Shared application state
///
/// Holds the pool handle; the pool itself is reference counted so cloning
/// the state per request is cheap.
#[derive(Clone, Debug)]
pub struct AppState {
    pub pool: MySqlPool,
    pub session: SessionOptions,
}

impl AppState {
    pub fn new(pool: MySqlPool, session: SessionOptions) -> Self {
        Self { pool, session }
    }
}
