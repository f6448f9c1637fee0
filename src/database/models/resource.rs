use bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of learning asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Document,
    Video,
    Image,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Document => "document",
            ResourceType::Video => "video",
            ResourceType::Image => "image",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A learning resource nested inside a class.
///
/// `files` and `comments` stay `None` until something is attached, so a
/// resource that never had comments is distinguishable from one whose
/// comment list is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceDoc {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ResourceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<FileDoc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<CommentDoc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime>,
}

impl ResourceDoc {
    /// Server-side constructor: id and creation timestamp are always assigned here
    pub fn new(title: impl Into<String>, kind: ResourceType, files: Option<Vec<FileDoc>>) -> Self {
        Self {
            id: ObjectId::new(),
            title: title.into(),
            kind,
            files,
            comments: None,
            created_at: Some(DateTime::now()),
        }
    }
}

/// Attached blob reference. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDoc {
    pub file_name: String,
    pub mime_type: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentDoc {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub user_id: ObjectId,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<CommentImageDoc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime>,
}

impl CommentDoc {
    pub fn new(
        user_id: ObjectId,
        content: impl Into<String>,
        images: Option<Vec<CommentImageDoc>>,
    ) -> Self {
        Self {
            id: ObjectId::new(),
            user_id,
            content: content.into(),
            images,
            created_at: Some(DateTime::now()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentImageDoc {
    pub url: String,
}
