#[cfg(feature = "postgres")]
use std::time::Duration;

#[cfg(feature = "postgres")]
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DbConn, Schema};

#[cfg(feature = "postgres")]
use scribe_core::RepoError;

#[cfg(feature = "postgres")]
use super::entity::post;

/// Configuration for the post database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Open the connection pool and make sure the `posts` table exists.
///
/// Any failure here is fatal for the server: callers should not start
/// listening without a working store.
#[cfg(feature = "postgres")]
pub async fn connect(config: &DatabaseConfig) -> Result<DbConn, RepoError> {
    tracing::info!("Connecting to post database...");

    let opts = ConnectOptions::new(&config.url)
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(300))
        .sqlx_logging(true)
        .to_owned();

    let db = Database::connect(opts)
        .await
        .map_err(|e| RepoError::Connection(e.to_string()))?;

    ensure_schema(&db).await?;

    tracing::info!(
        "Post database connected (pool: {})",
        config.max_connections
    );
    Ok(db)
}

/// `CREATE TABLE IF NOT EXISTS posts (...)`, derived from the entity.
#[cfg(feature = "postgres")]
async fn ensure_schema(db: &DbConn) -> Result<(), RepoError> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut stmt = schema.create_table_from_entity(post::Entity);
    stmt.if_not_exists();

    db.execute(backend.build(&stmt))
        .await
        .map_err(|e| RepoError::Connection(format!("schema setup failed: {e}")))?;
    Ok(())
}
