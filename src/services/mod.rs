pub mod error;
pub mod institution_service;
pub mod navigator;
pub mod resource_service;

pub use error::ServiceError;
pub use institution_service::InstitutionService;
pub use navigator::{HierarchyPath, Navigator, Resolved};
pub use resource_service::ResourceService;
