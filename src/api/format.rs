//! Projection of stored documents into the public wire format.
//!
//! Every identifier leaves as its 24-char hex string, list fields keep
//! their stored order, and optional lists that were never set stay absent
//! rather than becoming `[]`.

use bson::DateTime as BsonDateTime;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::database::models::{
    ClassDoc, CommentDoc, CommentImageDoc, FileDoc, InstitutionDoc, ResourceDoc, ResourceType,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstitutionView {
    pub id: String,
    pub name: String,
    pub classes: Vec<ClassView>,
}

/// Class summary; resources are listed through their own routes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassView {
    pub id: String,
    pub name: String,
    pub resource_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceView {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ResourceType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<FileView>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<CommentView>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileView {
    pub file_name: String,
    pub mime_type: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentView {
    pub id: String,
    pub user_id: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<CommentImageView>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentImageView {
    pub url: String,
}

fn timestamp(value: Option<BsonDateTime>) -> Option<DateTime<Utc>> {
    value.map(|dt| dt.to_chrono())
}

pub fn institution_to_view(doc: &InstitutionDoc) -> InstitutionView {
    InstitutionView {
        id: doc.id.to_hex(),
        name: doc.name.clone(),
        classes: doc.classes.iter().map(class_to_view).collect(),
    }
}

pub fn class_to_view(doc: &ClassDoc) -> ClassView {
    ClassView {
        id: doc.id.to_hex(),
        name: doc.name.clone(),
        resource_count: doc.resources.len(),
    }
}

pub fn resource_to_view(doc: &ResourceDoc) -> ResourceView {
    ResourceView {
        id: doc.id.to_hex(),
        title: doc.title.clone(),
        kind: doc.kind,
        files: doc
            .files
            .as_ref()
            .map(|files| files.iter().map(file_to_view).collect()),
        comments: doc
            .comments
            .as_ref()
            .map(|comments| comments.iter().map(comment_to_view).collect()),
        created_at: timestamp(doc.created_at),
    }
}

pub fn resources_to_views(docs: &[ResourceDoc]) -> Vec<ResourceView> {
    docs.iter().map(resource_to_view).collect()
}

pub fn file_to_view(doc: &FileDoc) -> FileView {
    FileView {
        file_name: doc.file_name.clone(),
        mime_type: doc.mime_type.clone(),
        url: doc.url.clone(),
    }
}

pub fn comment_to_view(doc: &CommentDoc) -> CommentView {
    CommentView {
        id: doc.id.to_hex(),
        user_id: doc.user_id.to_hex(),
        content: doc.content.clone(),
        images: doc
            .images
            .as_ref()
            .map(|images| images.iter().map(image_to_view).collect()),
        created_at: timestamp(doc.created_at),
    }
}

fn image_to_view(doc: &CommentImageDoc) -> CommentImageView {
    CommentImageView {
        url: doc.url.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::oid::ObjectId;
    use serde_json::json;

    #[test]
    fn absent_lists_stay_absent_on_the_wire() {
        let doc = ResourceDoc::new("Intro", ResourceType::Document, None);
        let view = resource_to_view(&doc);
        assert_eq!(view.files, None);
        assert_eq!(view.comments, None);

        let value = serde_json::to_value(&view).unwrap();
        assert!(value.get("files").is_none());
        assert!(value.get("comments").is_none());
        assert_eq!(value["type"], json!("document"));
        assert_eq!(value["id"], json!(doc.id.to_hex()));
    }

    #[test]
    fn emptied_lists_stay_empty() {
        let mut doc = ResourceDoc::new("Intro", ResourceType::Video, Some(vec![]));
        doc.comments = Some(vec![]);
        let value = serde_json::to_value(resource_to_view(&doc)).unwrap();
        assert_eq!(value["files"], json!([]));
        assert_eq!(value["comments"], json!([]));
    }

    #[test]
    fn comments_keep_stored_order_and_string_ids() {
        let author = ObjectId::new();
        let mut doc = ResourceDoc::new("Intro", ResourceType::Image, None);
        let comments: Vec<CommentDoc> = ["a", "b", "c"]
            .into_iter()
            .map(|text| CommentDoc::new(author, text, None))
            .collect();
        doc.comments = Some(comments.clone());

        let view = resource_to_view(&doc);
        let projected = view.comments.unwrap();
        let order: Vec<_> = projected.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
        assert_eq!(projected[1].id, comments[1].id.to_hex());
        assert_eq!(projected[1].user_id, author.to_hex());
    }

    #[test]
    fn timestamps_pass_through() {
        let doc = ResourceDoc::new("Intro", ResourceType::Document, None);
        let created = doc.created_at.unwrap();
        let view = resource_to_view(&doc);
        assert_eq!(
            view.created_at.unwrap().timestamp_millis(),
            created.timestamp_millis()
        );
    }

    #[test]
    fn class_view_counts_resources() {
        let mut class = ClassDoc::new("Algebra");
        class
            .resources
            .push(ResourceDoc::new("Intro", ResourceType::Document, None));
        let view = class_to_view(&class);
        assert_eq!(view.resource_count, 1);
        assert_eq!(view.id, class.id.to_hex());
    }
}
