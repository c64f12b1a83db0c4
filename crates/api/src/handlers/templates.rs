//! Handlers for the `/templates` resource.
//!
//! Saving never fails because of consistency findings; they are returned
//! alongside the stored template and logged as warnings.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::Json;
use templar_core::catalog::SavedTemplate;
use templar_core::consistency::Finding;
use templar_core::listing::TemplateFilter;
use templar_core::template::{SaveTemplate, Template, TemplatePreview};
use templar_core::types::normalize_id;

use crate::error::AppResult;
use crate::middleware::identity::ActingUser;
use crate::query::ConfirmParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/templates?q=&contract_type_id=&active_only=
pub async fn list_templates(
    State(state): State<AppState>,
    Query(filter): Query<TemplateFilter>,
) -> AppResult<Json<DataResponse<Vec<TemplatePreview>>>> {
    let previews = state.catalog.read().await.list_previews(&filter);
    tracing::debug!(
        query = %filter.query,
        contract_type_id = ?filter.contract_type_id,
        active_only = filter.active_only,
        count = previews.len(),
        "Listed templates"
    );
    Ok(Json(DataResponse { data: previews }))
}

/// POST /api/v1/templates
///
/// Create or update by payload id. Returns 201 on create, 200 on update.
pub async fn save_template(
    State(state): State<AppState>,
    actor: ActingUser,
    Json(input): Json<SaveTemplate>,
) -> AppResult<(StatusCode, Json<DataResponse<SavedTemplate>>)> {
    let mut catalog = state.catalog.write().await;
    let creating = normalize_id(input.id.clone())
        .map_or(true, |id| catalog.templates().find(&id).is_none());

    let saved = catalog.save_template(input, actor.as_str())?;
    drop(catalog);

    let template = &saved.template;
    tracing::info!(
        id = %template.id,
        name = %template.name,
        contract_type_id = %template.contract_type_id,
        actor = %actor.as_str(),
        created = creating,
        "Template saved"
    );
    if !saved.findings.is_empty() {
        tracing::warn!(
            id = %template.id,
            findings = saved.findings.len(),
            "Template saved with consistency findings"
        );
    }

    let status = if creating {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(DataResponse { data: saved })))
}

/// GET /api/v1/templates/orphans
pub async fn list_orphans(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Template>>>> {
    let catalog = state.catalog.read().await;
    let orphans: Vec<Template> = catalog.orphaned_templates().into_iter().cloned().collect();
    tracing::debug!(count = orphans.len(), "Listed orphaned templates");
    Ok(Json(DataResponse { data: orphans }))
}

/// GET /api/v1/templates/{id}
pub async fn get_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<Template>>> {
    let template = state.catalog.read().await.get_template(&id)?.clone();
    Ok(Json(DataResponse { data: template }))
}

/// DELETE /api/v1/templates/{id}?confirm=true
pub async fn delete_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<ConfirmParams>,
) -> AppResult<StatusCode> {
    params.require("Deleting a template")?;

    let removed = state.catalog.write().await.delete_template(&id)?;
    tracing::info!(id = %removed.id, name = %removed.name, "Template deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/templates/{id}/duplicate
pub async fn duplicate_template(
    State(state): State<AppState>,
    actor: ActingUser,
    Path(id): Path<String>,
) -> AppResult<(StatusCode, Json<DataResponse<Template>>)> {
    let copy = state
        .catalog
        .write()
        .await
        .duplicate_template(&id, actor.as_str())?;
    tracing::info!(
        source_id = %id,
        id = %copy.id,
        actor = %actor.as_str(),
        "Template duplicated"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: copy })))
}

/// GET /api/v1/templates/{id}/preview
///
/// Standalone HTML document with placeholder tokens left unsubstituted.
pub async fn preview_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let document = state.catalog.read().await.render_preview(&id)?;
    Ok(Html(document))
}

/// GET /api/v1/templates/{id}/consistency
pub async fn check_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<Vec<Finding>>>> {
    let findings = state.catalog.read().await.check_template(&id)?;
    Ok(Json(DataResponse { data: findings }))
}
