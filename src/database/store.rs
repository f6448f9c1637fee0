use async_trait::async_trait;
use bson::oid::ObjectId;

use super::manager::DatabaseError;
use super::models::InstitutionDoc;
use super::update::{ConditionalUpdate, UpdateOutcome};

/// Document store holding one document per institution.
///
/// Implementations must apply each `ConditionalUpdate` as a single atomic
/// write against one document and report how many documents its predicate
/// matched.
#[async_trait]
pub trait InstitutionStore: Send + Sync {
    async fn insert_institution(&self, institution: &InstitutionDoc) -> Result<(), DatabaseError>;

    async fn find_institution(&self, id: &ObjectId) -> Result<Option<InstitutionDoc>, DatabaseError>;

    async fn list_institutions(&self) -> Result<Vec<InstitutionDoc>, DatabaseError>;

    async fn apply(&self, update: ConditionalUpdate) -> Result<UpdateOutcome, DatabaseError>;

    async fn ping(&self) -> Result<(), DatabaseError>;
}
