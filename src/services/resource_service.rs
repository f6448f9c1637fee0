use std::sync::Arc;
use tracing::{info, warn};

use crate::api::format::{comment_to_view, resource_to_view, resources_to_views, CommentView, ResourceView};
use crate::api::payload::{NewComment, NewResource, ResourceUpdate};
use crate::database::models::{CommentDoc, CommentImageDoc, FileDoc, ResourceDoc};
use crate::database::{parse_object_id, ConditionalUpdate, InstitutionStore, ResourceFields};

use super::error::ServiceError;
use super::navigator::{HierarchyPath, Navigator};

/// Resource and comment operations scoped by their full ancestor path.
///
/// Writes are single conditional updates whose predicate encodes the path;
/// a zero match count is the not-found signal.
#[derive(Clone)]
pub struct ResourceService {
    store: Arc<dyn InstitutionStore>,
    navigator: Navigator,
}

impl ResourceService {
    pub fn new(store: Arc<dyn InstitutionStore>) -> Self {
        Self {
            navigator: Navigator::new(store.clone()),
            store,
        }
    }

    /// All resources of a class, in stored order
    pub async fn list_resources(
        &self,
        institution_id: &str,
        class_id: &str,
    ) -> Result<Vec<ResourceView>, ServiceError> {
        let path = HierarchyPath::parse(institution_id, class_id, None)?;
        let resolved = self.navigator.resolve(&path).await?;
        Ok(resources_to_views(&resolved.class().resources))
    }

    pub async fn get_resource(
        &self,
        institution_id: &str,
        class_id: &str,
        resource_id: &str,
    ) -> Result<ResourceView, ServiceError> {
        let path = HierarchyPath::parse(institution_id, class_id, Some(resource_id))?;
        self.fetch_view(&path).await
    }

    /// Append a new resource with a server-assigned id and creation timestamp
    pub async fn create_resource(
        &self,
        institution_id: &str,
        class_id: &str,
        input: NewResource,
    ) -> Result<ResourceView, ServiceError> {
        let path = HierarchyPath::parse(institution_id, class_id, None)?;
        let files = input
            .files
            .map(|files| files.into_iter().map(FileDoc::from).collect());
        let resource = ResourceDoc::new(input.title, input.kind, files);

        let outcome = self
            .store
            .apply(ConditionalUpdate::PushResource {
                institution: path.institution,
                class: path.class,
                resource: resource.clone(),
            })
            .await?;

        if outcome.is_miss() {
            return Err(self.diagnose_miss(&path).await);
        }

        info!(
            institution = %path.institution,
            class = %path.class,
            resource = %resource.id,
            "created resource"
        );
        Ok(resource_to_view(&resource))
    }

    /// Set only the supplied fields; files and comments not named stay as they are
    pub async fn update_resource(
        &self,
        institution_id: &str,
        class_id: &str,
        resource_id: &str,
        input: ResourceUpdate,
    ) -> Result<ResourceView, ServiceError> {
        let (path, resource) = HierarchyPath::parse_resource(institution_id, class_id, resource_id)?;
        let fields = ResourceFields::from(input);
        if fields.is_empty() {
            return Err(ServiceError::NoUpdateData);
        }

        let outcome = self
            .store
            .apply(ConditionalUpdate::SetResourceFields {
                institution: path.institution,
                class: path.class,
                resource,
                fields,
            })
            .await?;

        if outcome.is_miss() {
            return Err(self.diagnose_miss(&path).await);
        }

        info!(
            institution = %path.institution,
            class = %path.class,
            resource = %resource,
            modified = outcome.modified,
            "updated resource"
        );
        self.fetch_view(&path).await
    }

    /// Remove a resource together with its embedded files and comments
    pub async fn delete_resource(
        &self,
        institution_id: &str,
        class_id: &str,
        resource_id: &str,
    ) -> Result<(), ServiceError> {
        let (path, resource) = HierarchyPath::parse_resource(institution_id, class_id, resource_id)?;

        let outcome = self
            .store
            .apply(ConditionalUpdate::PullResource {
                institution: path.institution,
                class: path.class,
                resource,
            })
            .await?;

        if outcome.is_miss() {
            return Err(self.diagnose_miss(&path).await);
        }

        info!(
            institution = %path.institution,
            class = %path.class,
            resource = %resource,
            "deleted resource"
        );
        Ok(())
    }

    /// Append a comment with a server-assigned id and creation timestamp
    pub async fn create_comment(
        &self,
        institution_id: &str,
        class_id: &str,
        resource_id: &str,
        input: NewComment,
    ) -> Result<CommentView, ServiceError> {
        let (path, resource) = HierarchyPath::parse_resource(institution_id, class_id, resource_id)?;
        let author = parse_object_id("user_id", &input.user_id)?;
        let images = input
            .images
            .map(|images| images.into_iter().map(CommentImageDoc::from).collect());
        let comment = CommentDoc::new(author, input.content, images);

        let outcome = self
            .store
            .apply(ConditionalUpdate::PushComment {
                institution: path.institution,
                class: path.class,
                resource,
                comment: comment.clone(),
            })
            .await?;

        if outcome.is_miss() {
            return Err(self.diagnose_miss(&path).await);
        }

        info!(
            resource = %resource,
            comment = %comment.id,
            "created comment"
        );
        Ok(comment_to_view(&comment))
    }

    async fn fetch_view(&self, path: &HierarchyPath) -> Result<ResourceView, ServiceError> {
        let resolved = self.navigator.resolve(path).await?;
        match resolved.resource() {
            Some(resource) => Ok(resource_to_view(resource)),
            None => Err(not_found_at_leaf(path)),
        }
    }

    /// A conditional update matched nothing. Re-resolve the path to name the
    /// missing segment; if the path resolves now, a concurrent write removed
    /// it in between and the deepest segment is reported.
    async fn diagnose_miss(&self, path: &HierarchyPath) -> ServiceError {
        let err = match self.navigator.resolve(path).await {
            Err(err) => err,
            Ok(_) => not_found_at_leaf(path),
        };
        warn!(
            institution = %path.institution,
            class = %path.class,
            error = %err,
            "conditional update matched no document"
        );
        err
    }
}

fn not_found_at_leaf(path: &HierarchyPath) -> ServiceError {
    match path.resource {
        Some(resource) => ServiceError::ResourceNotFound {
            class: path.class.to_hex(),
            resource: resource.to_hex(),
        },
        None => ServiceError::ClassNotFound {
            institution: path.institution.to_hex(),
            class: path.class.to_hex(),
        },
    }
}
