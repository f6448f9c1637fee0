//! In-process institution store.
//!
//! Mirrors the match/modify semantics of the MongoDB commands rendered by
//! `ConditionalUpdate::to_command`, so services behave identically on
//! either backend. Each write holds the lock for its whole duration, which
//! gives the same single-document atomicity the driver provides.

use async_trait::async_trait;
use bson::oid::ObjectId;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::manager::DatabaseError;
use super::models::{InstitutionDoc, ResourceDoc};
use super::store::InstitutionStore;
use super::update::{ConditionalUpdate, ResourceFields, UpdateOutcome};

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    institutions: Arc<RwLock<Vec<InstitutionDoc>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

const MISS: UpdateOutcome = UpdateOutcome {
    matched: 0,
    modified: 0,
};

const HIT: UpdateOutcome = UpdateOutcome {
    matched: 1,
    modified: 1,
};

fn find_resource<'a>(
    docs: &'a mut [InstitutionDoc],
    institution: &ObjectId,
    class: &ObjectId,
    resource: &ObjectId,
) -> Option<&'a mut ResourceDoc> {
    docs.iter_mut()
        .find(|d| &d.id == institution)?
        .class_mut(class)?
        .resource_mut(resource)
}

fn set_fields(target: &mut ResourceDoc, fields: ResourceFields) -> bool {
    let before = target.clone();
    if let Some(title) = fields.title {
        target.title = title;
    }
    if let Some(kind) = fields.kind {
        target.kind = kind;
    }
    if let Some(files) = fields.files {
        target.files = Some(files);
    }
    *target != before
}

#[async_trait]
impl InstitutionStore for MemoryStore {
    async fn insert_institution(&self, institution: &InstitutionDoc) -> Result<(), DatabaseError> {
        let mut docs = self.institutions.write().await;
        if docs.iter().any(|d| d.id == institution.id) {
            return Err(DatabaseError::DuplicateKey(format!(
                "institution {} already exists",
                institution.id
            )));
        }
        docs.push(institution.clone());
        Ok(())
    }

    async fn find_institution(&self, id: &ObjectId) -> Result<Option<InstitutionDoc>, DatabaseError> {
        let docs = self.institutions.read().await;
        Ok(docs.iter().find(|d| &d.id == id).cloned())
    }

    async fn list_institutions(&self) -> Result<Vec<InstitutionDoc>, DatabaseError> {
        Ok(self.institutions.read().await.clone())
    }

    async fn apply(&self, update: ConditionalUpdate) -> Result<UpdateOutcome, DatabaseError> {
        let mut docs = self.institutions.write().await;

        let outcome = match update {
            ConditionalUpdate::PushClass { institution, class } => {
                match docs.iter_mut().find(|d| d.id == institution) {
                    Some(doc) => {
                        doc.classes.push(class);
                        HIT
                    }
                    None => MISS,
                }
            }
            ConditionalUpdate::PushResource {
                institution,
                class,
                resource,
            } => {
                let target = docs
                    .iter_mut()
                    .find(|d| d.id == institution)
                    .and_then(|d| d.class_mut(&class));
                match target {
                    Some(class) => {
                        class.resources.push(resource);
                        HIT
                    }
                    None => MISS,
                }
            }
            ConditionalUpdate::SetResourceFields {
                institution,
                class,
                resource,
                fields,
            } => match find_resource(&mut docs, &institution, &class, &resource) {
                Some(target) => UpdateOutcome {
                    matched: 1,
                    modified: u64::from(set_fields(target, fields)),
                },
                None => MISS,
            },
            ConditionalUpdate::PullResource {
                institution,
                class,
                resource,
            } => {
                let target = docs
                    .iter_mut()
                    .find(|d| d.id == institution)
                    .and_then(|d| d.class_mut(&class))
                    .filter(|c| c.resource(&resource).is_some());
                match target {
                    Some(class) => {
                        class.resources.retain(|r| r.id != resource);
                        HIT
                    }
                    None => MISS,
                }
            }
            ConditionalUpdate::PushComment {
                institution,
                class,
                resource,
                comment,
            } => match find_resource(&mut docs, &institution, &class, &resource) {
                Some(target) => {
                    target.comments.get_or_insert_with(Vec::new).push(comment);
                    HIT
                }
                None => MISS,
            },
        };

        Ok(outcome)
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{ClassDoc, CommentDoc, FileDoc, ResourceType};

    async fn seeded() -> (MemoryStore, ObjectId, ObjectId, ObjectId) {
        let store = MemoryStore::new();
        let mut institution = InstitutionDoc::new("North High");
        let mut class = ClassDoc::new("Algebra");
        let resource = ResourceDoc::new(
            "Intro",
            ResourceType::Document,
            Some(vec![FileDoc {
                file_name: "intro.pdf".into(),
                mime_type: "application/pdf".into(),
                url: "/files/intro".into(),
            }]),
        );
        let ids = (institution.id, class.id, resource.id);
        class.resources.push(resource);
        institution.classes.push(class);
        store.insert_institution(&institution).await.unwrap();
        (store, ids.0, ids.1, ids.2)
    }

    #[tokio::test]
    async fn push_resource_misses_unknown_class() {
        let (store, inst, _, _) = seeded().await;
        let outcome = store
            .apply(ConditionalUpdate::PushResource {
                institution: inst,
                class: ObjectId::new(),
                resource: ResourceDoc::new("x", ResourceType::Video, None),
            })
            .await
            .unwrap();
        assert!(outcome.is_miss());
    }

    #[tokio::test]
    async fn set_fields_preserves_untouched_fields() {
        let (store, inst, class, res) = seeded().await;
        let outcome = store
            .apply(ConditionalUpdate::SetResourceFields {
                institution: inst,
                class,
                resource: res,
                fields: ResourceFields {
                    title: Some("Renamed".into()),
                    ..Default::default()
                },
            })
            .await
            .unwrap();
        assert_eq!(outcome, HIT);

        let doc = store.find_institution(&inst).await.unwrap().unwrap();
        let resource = doc.class(&class).unwrap().resource(&res).unwrap();
        assert_eq!(resource.title, "Renamed");
        assert_eq!(resource.files.as_ref().map(Vec::len), Some(1));
        assert_eq!(resource.comments, None);
    }

    #[tokio::test]
    async fn identical_set_matches_without_modifying() {
        let (store, inst, class, res) = seeded().await;
        let outcome = store
            .apply(ConditionalUpdate::SetResourceFields {
                institution: inst,
                class,
                resource: res,
                fields: ResourceFields {
                    title: Some("Intro".into()),
                    ..Default::default()
                },
            })
            .await
            .unwrap();
        assert_eq!(outcome, UpdateOutcome { matched: 1, modified: 0 });
    }

    #[tokio::test]
    async fn resource_in_sibling_class_does_not_match() {
        let (store, inst, _, res) = seeded().await;
        let other = ClassDoc::new("Geometry");
        let other_id = other.id;
        store
            .apply(ConditionalUpdate::PushClass {
                institution: inst,
                class: other,
            })
            .await
            .unwrap();

        let outcome = store
            .apply(ConditionalUpdate::PullResource {
                institution: inst,
                class: other_id,
                resource: res,
            })
            .await
            .unwrap();
        assert!(outcome.is_miss());
    }

    #[tokio::test]
    async fn push_comment_creates_comment_list() {
        let (store, inst, class, res) = seeded().await;
        for text in ["first", "second"] {
            store
                .apply(ConditionalUpdate::PushComment {
                    institution: inst,
                    class,
                    resource: res,
                    comment: CommentDoc::new(ObjectId::new(), text, None),
                })
                .await
                .unwrap();
        }
        let doc = store.find_institution(&inst).await.unwrap().unwrap();
        let comments = doc
            .class(&class)
            .unwrap()
            .resource(&res)
            .unwrap()
            .comments
            .clone()
            .unwrap();
        let texts: Vec<_> = comments.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(texts, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn pull_resource_discards_descendants() {
        let (store, inst, class, res) = seeded().await;
        let outcome = store
            .apply(ConditionalUpdate::PullResource {
                institution: inst,
                class,
                resource: res,
            })
            .await
            .unwrap();
        assert_eq!(outcome, HIT);
        let doc = store.find_institution(&inst).await.unwrap().unwrap();
        assert!(doc.class(&class).unwrap().resources.is_empty());
    }

    #[tokio::test]
    async fn inserting_same_institution_twice_is_duplicate_key() {
        let store = MemoryStore::new();
        let institution = InstitutionDoc::new("Northside College");
        store.insert_institution(&institution).await.unwrap();

        let err = store.insert_institution(&institution).await.unwrap_err();
        assert!(matches!(err, DatabaseError::DuplicateKey(_)));
        assert_eq!(store.list_institutions().await.unwrap().len(), 1);
    }
}
