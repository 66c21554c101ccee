use sqlx::MySqlPool;
use sqlx::mysql::MySqlPoolOptions;
use std::time::Duration;

/// Builds the process-wide connection pool. The pool is constructed once
/// at startup and handed to the app via `web::Data`; connections are
/// acquired per request and released by the pool guard on every path.
pub async fn init_db(database_url: &str, max_connections: u32) -> MySqlPool {
    MySqlPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
        .expect("Failed to connect to database")
}
