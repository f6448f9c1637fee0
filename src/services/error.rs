use thiserror::Error;

use crate::database::{DatabaseError, InvalidIdentifier};

/// Failures of hierarchy resolution and nested mutations.
///
/// Not-found variants name the exact path segment that failed to resolve.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    InvalidIdentifier(#[from] InvalidIdentifier),

    #[error("Institution {0} not found")]
    InstitutionNotFound(String),

    #[error("Class {class} not found in institution {institution}")]
    ClassNotFound { institution: String, class: String },

    #[error("Resource {resource} not found in class {class}")]
    ResourceNotFound { class: String, resource: String },

    #[error("No update data provided")]
    NoUpdateData,

    #[error(transparent)]
    Database(#[from] DatabaseError),
}
