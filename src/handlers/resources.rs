// handlers/resources.rs - resources and comments nested under a class
//
// Path ids are passed through as opaque strings; conversion and
// not-found reporting happen in ResourceService.

use axum::extract::{rejection::JsonRejection, Path, State};
use axum::Json;

use crate::api::format::{CommentView, ResourceView};
use crate::api::payload::{NewComment, NewResource, ResourceUpdate};
use crate::state::AppState;

use super::response::{ApiResponse, ApiResult};

/// GET .../classes/:class_id/resources
pub async fn list(
    State(state): State<AppState>,
    Path((institution_id, class_id)): Path<(String, String)>,
) -> ApiResult<Vec<ResourceView>> {
    let resources = state
        .resources
        .list_resources(&institution_id, &class_id)
        .await?;
    Ok(ApiResponse::success(resources))
}

/// POST .../classes/:class_id/resources
pub async fn create(
    State(state): State<AppState>,
    Path((institution_id, class_id)): Path<(String, String)>,
    payload: Result<Json<NewResource>, JsonRejection>,
) -> ApiResult<ResourceView> {
    let Json(input) = payload?;
    let resource = state
        .resources
        .create_resource(&institution_id, &class_id, input)
        .await?;
    Ok(ApiResponse::created(resource))
}

/// GET .../resources/:resource_id
pub async fn show(
    State(state): State<AppState>,
    Path((institution_id, class_id, resource_id)): Path<(String, String, String)>,
) -> ApiResult<ResourceView> {
    let resource = state
        .resources
        .get_resource(&institution_id, &class_id, &resource_id)
        .await?;
    Ok(ApiResponse::success(resource))
}

/// PUT .../resources/:resource_id - partial update of title, type or files
pub async fn update(
    State(state): State<AppState>,
    Path((institution_id, class_id, resource_id)): Path<(String, String, String)>,
    payload: Result<Json<ResourceUpdate>, JsonRejection>,
) -> ApiResult<ResourceView> {
    let Json(input) = payload?;
    let resource = state
        .resources
        .update_resource(&institution_id, &class_id, &resource_id, input)
        .await?;
    Ok(ApiResponse::success(resource))
}

/// DELETE .../resources/:resource_id
pub async fn delete(
    State(state): State<AppState>,
    Path((institution_id, class_id, resource_id)): Path<(String, String, String)>,
) -> ApiResult<()> {
    state
        .resources
        .delete_resource(&institution_id, &class_id, &resource_id)
        .await?;
    Ok(ApiResponse::no_content())
}

/// POST .../resources/:resource_id/comments
pub async fn create_comment(
    State(state): State<AppState>,
    Path((institution_id, class_id, resource_id)): Path<(String, String, String)>,
    payload: Result<Json<NewComment>, JsonRejection>,
) -> ApiResult<CommentView> {
    let Json(input) = payload?;
    let comment = state
        .resources
        .create_comment(&institution_id, &class_id, &resource_id, input)
        .await?;
    Ok(ApiResponse::created(comment))
}
