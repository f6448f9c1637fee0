//! MongoDB-backed institution store

use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use futures::TryStreamExt;
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::{options::ClientOptions, Client, Collection};
use std::time::Duration;
use tracing::{debug, info};

use super::manager::DatabaseError;
use super::models::InstitutionDoc;
use super::store::InstitutionStore;
use super::update::{ConditionalUpdate, UpdateOutcome};

const DUPLICATE_KEY_CODE: i32 = 11000;

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY_CODE
    )
}

#[derive(Clone)]
pub struct MongoStore {
    client: Client,
    db_name: String,
    collection: Collection<InstitutionDoc>,
}

impl MongoStore {
    /// Connect and verify with a ping so an unreachable server fails fast
    pub async fn connect(
        uri: &str,
        db_name: &str,
        collection_name: &str,
        timeout_ms: u64,
    ) -> Result<Self, DatabaseError> {
        let mut options = ClientOptions::parse(uri)
            .await
            .map_err(|e| DatabaseError::ConnectionError(format!("Invalid MongoDB URI: {}", e)))?;
        options.server_selection_timeout = Some(Duration::from_millis(timeout_ms));
        options.connect_timeout = Some(Duration::from_millis(timeout_ms));

        let client = Client::with_options(options)
            .map_err(|e| DatabaseError::ConnectionError(format!("Failed to create client: {}", e)))?;

        client
            .database(db_name)
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| DatabaseError::ConnectionError(format!("MongoDB ping failed: {}", e)))?;

        info!("Connected to MongoDB database '{}' (collection '{}')", db_name, collection_name);

        let collection = client.database(db_name).collection::<InstitutionDoc>(collection_name);
        Ok(Self {
            client,
            db_name: db_name.to_string(),
            collection,
        })
    }
}

#[async_trait]
impl InstitutionStore for MongoStore {
    async fn insert_institution(&self, institution: &InstitutionDoc) -> Result<(), DatabaseError> {
        match self.collection.insert_one(institution).await {
            Ok(_) => Ok(()),
            Err(err) if is_duplicate_key(&err) => Err(DatabaseError::DuplicateKey(format!(
                "institution {} already exists",
                institution.id
            ))),
            Err(err) => Err(err.into()),
        }
    }

    async fn find_institution(&self, id: &ObjectId) -> Result<Option<InstitutionDoc>, DatabaseError> {
        Ok(self.collection.find_one(doc! { "_id": *id }).await?)
    }

    async fn list_institutions(&self) -> Result<Vec<InstitutionDoc>, DatabaseError> {
        let cursor = self.collection.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn apply(&self, update: ConditionalUpdate) -> Result<UpdateOutcome, DatabaseError> {
        let command = update.to_command()?;
        debug!(
            op = update.name(),
            institution = %update.institution(),
            filter = %command.filter,
            "issuing conditional update"
        );

        let mut action = self.collection.update_one(command.filter, command.update);
        if !command.array_filters.is_empty() {
            action = action.array_filters(command.array_filters);
        }
        let result = action.await?;

        Ok(UpdateOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        self.client
            .database(&self.db_name)
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| DatabaseError::ConnectionError(format!("MongoDB ping failed: {}", e)))?;
        Ok(())
    }
}
