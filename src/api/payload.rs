//! Request bodies accepted at the HTTP boundary.
//!
//! All bodies reject unknown fields, so a client cannot smuggle in `_id`,
//! `id`, `created_at` or nested `comments`. Those are assigned server-side.

use serde::Deserialize;

use crate::database::models::{CommentImageDoc, FileDoc, ResourceType};
use crate::database::ResourceFields;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewInstitution {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewClass {
    pub name: String,
}

/// File reference returned by the blob store for an uploaded attachment
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileInput {
    pub file_name: String,
    pub mime_type: String,
    pub url: String,
}

impl From<FileInput> for FileDoc {
    fn from(input: FileInput) -> Self {
        FileDoc {
            file_name: input.file_name,
            mime_type: input.mime_type,
            url: input.url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommentImageInput {
    pub url: String,
}

impl From<CommentImageInput> for CommentImageDoc {
    fn from(input: CommentImageInput) -> Self {
        CommentImageDoc { url: input.url }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewResource {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ResourceType,
    #[serde(default)]
    pub files: Option<Vec<FileInput>>,
}

/// Partial resource update. A `null` value counts as not supplied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<ResourceType>,
    #[serde(default)]
    pub files: Option<Vec<FileInput>>,
}

impl From<ResourceUpdate> for ResourceFields {
    fn from(update: ResourceUpdate) -> Self {
        ResourceFields {
            title: update.title,
            kind: update.kind,
            files: update
                .files
                .map(|files| files.into_iter().map(FileDoc::from).collect()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewComment {
    pub user_id: String,
    pub content: String,
    #[serde(default)]
    pub images: Option<Vec<CommentImageInput>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_resource_rejects_client_supplied_ids() {
        let body = json!({ "_id": "65f000000000000000000000", "title": "Intro", "type": "document" });
        assert!(serde_json::from_value::<NewResource>(body).is_err());

        let body = json!({ "id": "x", "title": "Intro", "type": "document" });
        assert!(serde_json::from_value::<NewResource>(body).is_err());
    }

    #[test]
    fn new_resource_rejects_unknown_type() {
        let body = json!({ "title": "Intro", "type": "podcast" });
        assert!(serde_json::from_value::<NewResource>(body).is_err());
    }

    #[test]
    fn update_treats_null_as_absent() {
        let update: ResourceUpdate =
            serde_json::from_value(json!({ "title": null, "type": "video" })).unwrap();
        let fields = ResourceFields::from(update);
        assert_eq!(fields.title, None);
        assert_eq!(fields.kind, Some(ResourceType::Video));
        assert!(!fields.is_empty());

        let empty: ResourceUpdate = serde_json::from_value(json!({})).unwrap();
        assert!(ResourceFields::from(empty).is_empty());
    }

    #[test]
    fn update_rejects_created_at_and_comments() {
        assert!(serde_json::from_value::<ResourceUpdate>(json!({ "created_at": "2024-01-01" })).is_err());
        assert!(serde_json::from_value::<ResourceUpdate>(json!({ "comments": [] })).is_err());
    }
}
