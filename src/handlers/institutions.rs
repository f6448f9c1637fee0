// handlers/institutions.rs - institution and class bootstrap endpoints

use axum::extract::{rejection::JsonRejection, Path, State};
use axum::Json;

use crate::api::format::{ClassView, InstitutionView};
use crate::api::payload::{NewClass, NewInstitution};
use crate::state::AppState;

use super::response::{ApiResponse, ApiResult};

/// GET /educationalInstitutions
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<InstitutionView>> {
    let institutions = state.institutions.list_institutions().await?;
    Ok(ApiResponse::success(institutions))
}

/// POST /educationalInstitutions
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewInstitution>, JsonRejection>,
) -> ApiResult<InstitutionView> {
    let Json(input) = payload?;
    let institution = state.institutions.create_institution(input).await?;
    Ok(ApiResponse::created(institution))
}

/// GET /educationalInstitutions/:institution_id
pub async fn show(
    State(state): State<AppState>,
    Path(institution_id): Path<String>,
) -> ApiResult<InstitutionView> {
    let institution = state.institutions.get_institution(&institution_id).await?;
    Ok(ApiResponse::success(institution))
}

/// GET /educationalInstitutions/:institution_id/classes
pub async fn list_classes(
    State(state): State<AppState>,
    Path(institution_id): Path<String>,
) -> ApiResult<Vec<ClassView>> {
    let classes = state.institutions.list_classes(&institution_id).await?;
    Ok(ApiResponse::success(classes))
}

/// POST /educationalInstitutions/:institution_id/classes
pub async fn create_class(
    State(state): State<AppState>,
    Path(institution_id): Path<String>,
    payload: Result<Json<NewClass>, JsonRejection>,
) -> ApiResult<ClassView> {
    let Json(input) = payload?;
    let class = state.institutions.create_class(&institution_id, input).await?;
    Ok(ApiResponse::created(class))
}
