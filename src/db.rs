//! SQLite connection pooling.

use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel::sqlite::SqliteConnection;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Upper bound on concurrent database connections.
pub const MAX_POOL_SIZE: u32 = 10;
/// How long a request may wait for a pooled connection before failing.
pub const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);
/// How long SQLite waits on a locked database before erroring.
const BUSY_TIMEOUT_MS: u32 = 60_000;

#[derive(Debug)]
struct ConnectionOptions;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute(&format!(
            "PRAGMA busy_timeout = {BUSY_TIMEOUT_MS}; PRAGMA foreign_keys = ON;"
        ))
        .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Build the r2d2 pool for the given SQLite database path.
pub fn establish_connection_pool(
    database_url: &str,
) -> Result<DbPool, diesel::r2d2::PoolError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .max_size(MAX_POOL_SIZE)
        .connection_timeout(ACQUIRE_TIMEOUT)
        .connection_customizer(Box::new(ConnectionOptions))
        .build(manager)
}
