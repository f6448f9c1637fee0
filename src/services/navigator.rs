//! Top-down resolution of institution → class → resource paths.
//!
//! The institution is fetched once, then the class and resource arrays are
//! scanned linearly by id. Arrays are expected to stay small, so no
//! secondary index is kept.

use bson::oid::ObjectId;
use std::sync::Arc;
use tracing::debug;

use crate::database::models::{ClassDoc, InstitutionDoc, ResourceDoc};
use crate::database::{parse_object_id, InstitutionStore, InvalidIdentifier};

use super::error::ServiceError;

/// Ancestor chain addressing a class or a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HierarchyPath {
    pub institution: ObjectId,
    pub class: ObjectId,
    pub resource: Option<ObjectId>,
}

impl HierarchyPath {
    /// Parse external ids top-down, failing on the first malformed segment
    pub fn parse(
        institution: &str,
        class: &str,
        resource: Option<&str>,
    ) -> Result<Self, InvalidIdentifier> {
        Ok(Self {
            institution: parse_object_id("institution_id", institution)?,
            class: parse_object_id("class_id", class)?,
            resource: resource
                .map(|r| parse_object_id("resource_id", r))
                .transpose()?,
        })
    }

    /// Parse a path that must end in a resource, returning the resource id alongside
    pub fn parse_resource(
        institution: &str,
        class: &str,
        resource: &str,
    ) -> Result<(Self, ObjectId), InvalidIdentifier> {
        let path = Self::parse(institution, class, None)?;
        let resource = parse_object_id("resource_id", resource)?;
        Ok((
            Self {
                resource: Some(resource),
                ..path
            },
            resource,
        ))
    }

    #[cfg(test)]
    pub fn class_path(&self) -> Self {
        Self {
            resource: None,
            ..*self
        }
    }
}

/// Result of a successful resolution. Holds the fetched institution and the
/// positions of the matched class and resource inside it.
#[derive(Debug, Clone)]
pub struct Resolved {
    institution: InstitutionDoc,
    class_index: usize,
    resource_index: Option<usize>,
}

impl Resolved {
    #[cfg(test)]
    pub fn institution(&self) -> &InstitutionDoc {
        &self.institution
    }

    pub fn class(&self) -> &ClassDoc {
        &self.institution.classes[self.class_index]
    }

    pub fn resource(&self) -> Option<&ResourceDoc> {
        self.resource_index.map(|i| &self.class().resources[i])
    }
}

#[derive(Clone)]
pub struct Navigator {
    store: Arc<dyn InstitutionStore>,
}

impl Navigator {
    pub fn new(store: Arc<dyn InstitutionStore>) -> Self {
        Self { store }
    }

    pub async fn institution(&self, id: &ObjectId) -> Result<InstitutionDoc, ServiceError> {
        self.store
            .find_institution(id)
            .await?
            .ok_or_else(|| ServiceError::InstitutionNotFound(id.to_hex()))
    }

    /// Resolve every segment of `path`, reporting the first one that is missing
    pub async fn resolve(&self, path: &HierarchyPath) -> Result<Resolved, ServiceError> {
        let institution = self.institution(&path.institution).await?;

        let class_index = institution
            .classes
            .iter()
            .position(|c| c.id == path.class)
            .ok_or_else(|| ServiceError::ClassNotFound {
                institution: path.institution.to_hex(),
                class: path.class.to_hex(),
            })?;

        let resource_index = match &path.resource {
            Some(resource) => Some(
                institution.classes[class_index]
                    .resources
                    .iter()
                    .position(|r| &r.id == resource)
                    .ok_or_else(|| ServiceError::ResourceNotFound {
                        class: path.class.to_hex(),
                        resource: resource.to_hex(),
                    })?,
            ),
            None => None,
        };

        debug!(
            institution = %path.institution,
            class = %path.class,
            resource = ?path.resource.map(|r| r.to_hex()),
            "resolved hierarchy path"
        );

        Ok(Resolved {
            institution,
            class_index,
            resource_index,
        })
    }
}
