//! Conditional single-document writes against an institution document.
//!
//! Every variant carries the full ancestor path of the element it touches.
//! The match predicate of the rendered command encodes that path, so a
//! zero `matched` count means some segment did not exist at write time.

use bson::{doc, oid::ObjectId, Bson, Document};

use super::manager::DatabaseError;
use super::models::{ClassDoc, CommentDoc, FileDoc, ResourceDoc, ResourceType};

/// Partial set of resource fields for an in-place update.
///
/// Ids, `created_at` and `comments` are deliberately not representable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceFields {
    pub title: Option<String>,
    pub kind: Option<ResourceType>,
    pub files: Option<Vec<FileDoc>>,
}

impl ResourceFields {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.kind.is_none() && self.files.is_none()
    }

    /// Field names as stored, paired with their BSON values
    pub fn to_bson_pairs(&self) -> Result<Vec<(&'static str, Bson)>, DatabaseError> {
        let mut pairs = Vec::new();
        if let Some(title) = &self.title {
            pairs.push(("title", Bson::String(title.clone())));
        }
        if let Some(kind) = self.kind {
            pairs.push(("type", Bson::String(kind.as_str().to_string())));
        }
        if let Some(files) = &self.files {
            pairs.push(("files", bson::to_bson(files)?));
        }
        Ok(pairs)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConditionalUpdate {
    PushClass {
        institution: ObjectId,
        class: ClassDoc,
    },
    PushResource {
        institution: ObjectId,
        class: ObjectId,
        resource: ResourceDoc,
    },
    SetResourceFields {
        institution: ObjectId,
        class: ObjectId,
        resource: ObjectId,
        fields: ResourceFields,
    },
    PullResource {
        institution: ObjectId,
        class: ObjectId,
        resource: ObjectId,
    },
    PushComment {
        institution: ObjectId,
        class: ObjectId,
        resource: ObjectId,
        comment: CommentDoc,
    },
}

/// MongoDB wire form of a conditional update
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateCommand {
    pub filter: Document,
    pub update: Document,
    pub array_filters: Vec<Document>,
}

/// Outcome of a single conditional write
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub matched: u64,
    pub modified: u64,
}

impl UpdateOutcome {
    pub fn is_miss(&self) -> bool {
        self.matched == 0
    }
}

impl ConditionalUpdate {
    /// Short operation name for logging
    pub fn name(&self) -> &'static str {
        match self {
            ConditionalUpdate::PushClass { .. } => "push_class",
            ConditionalUpdate::PushResource { .. } => "push_resource",
            ConditionalUpdate::SetResourceFields { .. } => "set_resource_fields",
            ConditionalUpdate::PullResource { .. } => "pull_resource",
            ConditionalUpdate::PushComment { .. } => "push_comment",
        }
    }

    pub fn institution(&self) -> &ObjectId {
        match self {
            ConditionalUpdate::PushClass { institution, .. }
            | ConditionalUpdate::PushResource { institution, .. }
            | ConditionalUpdate::SetResourceFields { institution, .. }
            | ConditionalUpdate::PullResource { institution, .. }
            | ConditionalUpdate::PushComment { institution, .. } => institution,
        }
    }

    pub fn to_command(&self) -> Result<UpdateCommand, DatabaseError> {
        let command = match self {
            ConditionalUpdate::PushClass { institution, class } => UpdateCommand {
                filter: doc! { "_id": *institution },
                update: doc! { "$push": { "classes": bson::to_bson(class)? } },
                array_filters: Vec::new(),
            },
            ConditionalUpdate::PushResource {
                institution,
                class,
                resource,
            } => UpdateCommand {
                filter: doc! { "_id": *institution, "classes._id": *class },
                update: doc! { "$push": { "classes.$.resources": bson::to_bson(resource)? } },
                array_filters: Vec::new(),
            },
            ConditionalUpdate::SetResourceFields {
                institution,
                class,
                resource,
                fields,
            } => {
                let mut set = Document::new();
                for (key, value) in fields.to_bson_pairs()? {
                    set.insert(format!("classes.$[class].resources.$[res].{}", key), value);
                }
                UpdateCommand {
                    filter: resource_filter(institution, class, resource),
                    update: doc! { "$set": set },
                    array_filters: resource_array_filters(class, resource),
                }
            }
            ConditionalUpdate::PullResource {
                institution,
                class,
                resource,
            } => UpdateCommand {
                filter: resource_filter(institution, class, resource),
                update: doc! { "$pull": { "classes.$.resources": { "_id": *resource } } },
                array_filters: Vec::new(),
            },
            ConditionalUpdate::PushComment {
                institution,
                class,
                resource,
                comment,
            } => UpdateCommand {
                filter: resource_filter(institution, class, resource),
                update: doc! {
                    "$push": {
                        "classes.$[class].resources.$[res].comments": bson::to_bson(comment)?
                    }
                },
                array_filters: resource_array_filters(class, resource),
            },
        };
        Ok(command)
    }
}

// $elemMatch binds class and resource to the same array element; a plain
// dotted match would also accept the resource id living in a sibling class.
fn resource_filter(institution: &ObjectId, class: &ObjectId, resource: &ObjectId) -> Document {
    doc! {
        "_id": *institution,
        "classes": { "$elemMatch": { "_id": *class, "resources._id": *resource } },
    }
}

fn resource_array_filters(class: &ObjectId, resource: &ObjectId) -> Vec<Document> {
    vec![doc! { "class._id": *class }, doc! { "res._id": *resource }]
}
