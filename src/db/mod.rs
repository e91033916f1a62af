/// Database access layer
///
/// A single pooled `mongodb::Client` is created at startup; handlers check
/// connections out implicitly through each driver call, so every exit path
/// returns its connection to the pool.
pub mod ninja_repo;

pub use ninja_repo::{NinjaRepository, NEARBY_MAX_DISTANCE_METERS};

use mongodb::bson::doc;
use mongodb::{Client, Database};

use crate::config::DatabaseConfig;
use crate::error::Result;

/// Open a pooled client and select the configured database.
///
/// The driver connects lazily; an unreachable server surfaces on the first
/// operation and maps to the 500 taxonomy entry.
pub async fn connect(config: &DatabaseConfig) -> Result<Database> {
    let client = Client::with_uri_str(&config.uri).await?;
    Ok(client.database(&config.database))
}

/// Round-trip ping used by the health endpoint.
pub async fn ping(db: &Database) -> Result<()> {
    db.run_command(doc! { "ping": 1 }, None).await?;
    Ok(())
}
