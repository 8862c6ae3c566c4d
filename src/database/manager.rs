use std::time::Duration;

use bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};
use thiserror::Error;
use tracing::info;

use crate::config::MongoConfig;
use crate::database::document::CourseDocument;

const APP_NAME: &str = "course-content-api";

/// Errors from DatabaseManager
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Invalid connection URI: {0}")]
    InvalidUri(String),

    #[error("Ping timed out after {0:?}")]
    PingTimeout(Duration),

    #[error(transparent)]
    Mongo(#[from] mongodb::error::Error),
}

/// Owns the long-lived store client. Created once at startup and shared
/// read-only by every request.
#[derive(Clone, Debug)]
pub struct DatabaseManager {
    client: Client,
    database: Database,
    courses_collection: String,
    ping_timeout: Duration,
}

impl DatabaseManager {
    /// Connect to the store and verify it answers a ping.
    pub async fn connect(config: &MongoConfig) -> Result<Self, DatabaseError> {
        let mut options = ClientOptions::parse(&config.uri)
            .await
            .map_err(|e| DatabaseError::InvalidUri(e.to_string()))?;
        options.app_name = Some(APP_NAME.to_string());
        options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));
        options.server_selection_timeout = Some(Duration::from_secs(config.connect_timeout_secs));

        let client = Client::with_options(options)?;
        let manager = Self {
            database: client.database(&config.database),
            client,
            courses_collection: config.courses_collection.clone(),
            ping_timeout: Duration::from_secs(config.ping_timeout_secs),
        };

        manager.ping().await?;
        info!("Connected to MongoDB database {}", config.database);
        Ok(manager)
    }

    pub async fn ping(&self) -> Result<(), DatabaseError> {
        match tokio::time::timeout(self.ping_timeout, self.database.run_command(doc! { "ping": 1 }, None)).await {
            Ok(result) => {
                result?;
                Ok(())
            }
            Err(_) => Err(DatabaseError::PingTimeout(self.ping_timeout)),
        }
    }

    pub fn courses(&self) -> Collection<CourseDocument> {
        self.database.collection(&self.courses_collection)
    }

    /// Drop the whole database. Used to clean up throwaway test databases.
    pub async fn drop_database(&self) -> Result<(), DatabaseError> {
        self.database.drop(None).await?;
        Ok(())
    }

    /// Close the client once in-flight work has drained.
    pub async fn shutdown(self) {
        self.client.shutdown().await;
        info!("Closed MongoDB client");
    }
}
