use bson::oid::ObjectId;
use thiserror::Error;

/// A path segment or reference that is not a valid 24-hex ObjectId
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid identifier for {field}: '{value}'")]
pub struct InvalidIdentifier {
    pub field: &'static str,
    pub value: String,
}

/// Convert an opaque external id into the store's native identifier
pub fn parse_object_id(field: &'static str, value: &str) -> Result<ObjectId, InvalidIdentifier> {
    ObjectId::parse_str(value).map_err(|_| InvalidIdentifier {
        field,
        value: value.to_string(),
    })
}
