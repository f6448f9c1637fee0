use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use super::resource::ResourceDoc;

/// Root aggregate. Owns every class, resource and comment below it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstitutionDoc {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    #[serde(default)]
    pub classes: Vec<ClassDoc>,
}

impl InstitutionDoc {
    /// New institution with a freshly generated id and no classes
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ObjectId::new(),
            name: name.into(),
            classes: Vec::new(),
        }
    }

    pub fn class(&self, class_id: &ObjectId) -> Option<&ClassDoc> {
        self.classes.iter().find(|c| &c.id == class_id)
    }

    pub fn class_mut(&mut self, class_id: &ObjectId) -> Option<&mut ClassDoc> {
        self.classes.iter_mut().find(|c| &c.id == class_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDoc {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    #[serde(default)]
    pub resources: Vec<ResourceDoc>,
}

impl ClassDoc {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ObjectId::new(),
            name: name.into(),
            resources: Vec::new(),
        }
    }

    pub fn resource(&self, resource_id: &ObjectId) -> Option<&ResourceDoc> {
        self.resources.iter().find(|r| &r.id == resource_id)
    }

    pub fn resource_mut(&mut self, resource_id: &ObjectId) -> Option<&mut ResourceDoc> {
        self.resources.iter_mut().find(|r| &r.id == resource_id)
    }
}
