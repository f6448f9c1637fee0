use std::sync::Arc;
use tracing::{info, warn};

use crate::api::format::{class_to_view, institution_to_view, ClassView, InstitutionView};
use crate::api::payload::{NewClass, NewInstitution};
use crate::database::models::{ClassDoc, InstitutionDoc};
use crate::database::{parse_object_id, ConditionalUpdate, InstitutionStore};

use super::error::ServiceError;
use super::navigator::Navigator;

/// Institution and class bootstrap on top of the same store handle
#[derive(Clone)]
pub struct InstitutionService {
    store: Arc<dyn InstitutionStore>,
    navigator: Navigator,
}

impl InstitutionService {
    pub fn new(store: Arc<dyn InstitutionStore>) -> Self {
        Self {
            navigator: Navigator::new(store.clone()),
            store,
        }
    }

    pub async fn list_institutions(&self) -> Result<Vec<InstitutionView>, ServiceError> {
        let docs = self.store.list_institutions().await?;
        Ok(docs.iter().map(institution_to_view).collect())
    }

    pub async fn create_institution(
        &self,
        input: NewInstitution,
    ) -> Result<InstitutionView, ServiceError> {
        let institution = InstitutionDoc::new(input.name);
        self.store.insert_institution(&institution).await?;
        info!(institution = %institution.id, "created institution");
        Ok(institution_to_view(&institution))
    }

    pub async fn get_institution(&self, institution_id: &str) -> Result<InstitutionView, ServiceError> {
        let id = parse_object_id("institution_id", institution_id)?;
        let institution = self.navigator.institution(&id).await?;
        Ok(institution_to_view(&institution))
    }

    pub async fn list_classes(&self, institution_id: &str) -> Result<Vec<ClassView>, ServiceError> {
        let id = parse_object_id("institution_id", institution_id)?;
        let institution = self.navigator.institution(&id).await?;
        Ok(institution.classes.iter().map(class_to_view).collect())
    }

    /// Append an empty class with a server-assigned id
    pub async fn create_class(
        &self,
        institution_id: &str,
        input: NewClass,
    ) -> Result<ClassView, ServiceError> {
        let id = parse_object_id("institution_id", institution_id)?;
        let class = ClassDoc::new(input.name);

        let outcome = self
            .store
            .apply(ConditionalUpdate::PushClass {
                institution: id,
                class: class.clone(),
            })
            .await?;

        if outcome.is_miss() {
            warn!(institution = %id, "class append matched no institution");
            return Err(ServiceError::InstitutionNotFound(id.to_hex()));
        }

        info!(institution = %id, class = %class.id, "created class");
        Ok(class_to_view(&class))
    }
}
