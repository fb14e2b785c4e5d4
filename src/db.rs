/*
 * Responsibility
 * - Connect to the document store at startup (the caller exits on failure)
 * - A cheap round trip for readiness checks
 */
use mongodb::{Client, Database, bson::doc, options::ClientOptions};
use thiserror::Error;

use crate::config::DatabaseConfig;

/// Used when the URI names no database.
const DEFAULT_DATABASE: &str = "algovisualizer";

#[derive(Debug, Error)]
pub enum DbError {
    #[error("database connection failed: {0}")]
    Connect(#[source] mongodb::error::Error),
    #[error("database command failed: {0}")]
    Command(#[source] mongodb::error::Error),
}

/// Connect eagerly: the driver connects lazily, so one `ping` is issued before
/// this returns and a bad URI or unreachable server surfaces at startup
/// instead of on the first request.
pub async fn connect(config: &DatabaseConfig) -> Result<Database, DbError> {
    let options = client_options(config).await.map_err(DbError::Connect)?;
    let name = options
        .default_database
        .clone()
        .unwrap_or_else(|| DEFAULT_DATABASE.to_string());

    let client = Client::with_options(options).map_err(DbError::Connect)?;
    let database = client.database(&name);
    run_ping(&database).await.map_err(DbError::Connect)?;

    tracing::info!(
        database = %name,
        max_pool_size = config.max_pool_size,
        "database connected"
    );
    Ok(database)
}

pub async fn ping(database: &Database) -> Result<(), DbError> {
    run_ping(database).await.map_err(DbError::Command)
}

async fn run_ping(database: &Database) -> mongodb::error::Result<()> {
    database.run_command(doc! { "ping": 1 }).await?;
    Ok(())
}

async fn client_options(config: &DatabaseConfig) -> mongodb::error::Result<ClientOptions> {
    let mut options = ClientOptions::parse(&config.uri).await?;
    if options.app_name.is_none() {
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
    }
    options.max_pool_size = Some(config.max_pool_size);
    options.connect_timeout = Some(config.connect_timeout);
    options.server_selection_timeout = Some(config.connect_timeout);
    Ok(options)
}

/// Handle that performs no I/O until used; for tests that need an `AppState`.
#[cfg(test)]
pub fn unreachable_database() -> Database {
    use mongodb::options::ServerAddress;

    let mut options = ClientOptions::default();
    options.hosts = vec![ServerAddress::parse("127.0.0.1:1").unwrap()];
    options.connect_timeout = Some(std::time::Duration::from_millis(500));
    options.server_selection_timeout = Some(std::time::Duration::from_millis(500));
    Client::with_options(options).unwrap().database("unreachable")
}
