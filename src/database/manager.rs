use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::config::{DatabaseConfig, StoreBackend};

use super::memory::MemoryStore;
use super::mongo::MongoStore;
use super::store::InstitutionStore;

/// Errors raised by the document store layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    #[error("BSON serialization error: {0}")]
    Serialization(#[from] bson::ser::Error),

    #[error(transparent)]
    Mongo(#[from] mongodb::error::Error),
}

/// Builds the store handle that gets passed into every service
pub struct DatabaseManager;

impl DatabaseManager {
    pub async fn connect(config: &DatabaseConfig) -> Result<Arc<dyn InstitutionStore>, DatabaseError> {
        match config.backend {
            StoreBackend::Memory => {
                info!("Using in-memory institution store");
                Ok(Arc::new(MemoryStore::new()))
            }
            StoreBackend::Mongo => {
                let uri = config
                    .uri
                    .as_deref()
                    .ok_or(DatabaseError::ConfigMissing("MONGODB_URI"))?;
                let store = MongoStore::connect(
                    uri,
                    &config.name,
                    &config.collection,
                    config.connect_timeout_ms,
                )
                .await?;
                Ok(Arc::new(store))
            }
        }
    }
}
