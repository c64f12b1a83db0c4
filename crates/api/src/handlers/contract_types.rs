//! Handlers for the `/contract-types` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use templar_core::contract_type::{ContractType, SaveContractType};
use templar_core::types::{normalize_id, EntityId};

use crate::error::AppResult;
use crate::query::ConfirmParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Result of deleting a contract type.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedContractType {
    pub id: EntityId,
    /// Templates still bound to the deleted contract type.
    pub orphaned_template_ids: Vec<EntityId>,
}

/// GET /api/v1/contract-types
pub async fn list_contract_types(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ContractType>>>> {
    let catalog = state.catalog.read().await;
    let items: Vec<ContractType> = catalog.list_contract_types().into_iter().cloned().collect();
    tracing::debug!(count = items.len(), "Listed contract types");
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/contract-types
///
/// Create or update by payload id. Returns 201 when a new contract type was
/// created and 200 when an existing one was updated.
pub async fn save_contract_type(
    State(state): State<AppState>,
    Json(input): Json<SaveContractType>,
) -> AppResult<(StatusCode, Json<DataResponse<ContractType>>)> {
    let mut catalog = state.catalog.write().await;
    let creating = normalize_id(input.id.clone())
        .map_or(true, |id| catalog.contract_types().find(&id).is_none());

    let saved = catalog.save_contract_type(input)?;
    tracing::info!(
        id = %saved.id,
        name = %saved.name,
        placeholders = saved.placeholders.len(),
        created = creating,
        "Contract type saved"
    );

    let status = if creating {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(DataResponse { data: saved })))
}

/// GET /api/v1/contract-types/{id}
pub async fn get_contract_type(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<ContractType>>> {
    let catalog = state.catalog.read().await;
    let contract_type = catalog.get_contract_type(&id)?.clone();
    Ok(Json(DataResponse {
        data: contract_type,
    }))
}

/// DELETE /api/v1/contract-types/{id}?confirm=true
///
/// Templates bound to the contract type are kept; their ids are returned so
/// the caller can rebind or remove them.
pub async fn delete_contract_type(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<ConfirmParams>,
) -> AppResult<Json<DataResponse<DeletedContractType>>> {
    params.require("Deleting a contract type")?;

    let orphaned_template_ids = state.catalog.write().await.delete_contract_type(&id)?;
    tracing::info!(id = %id, "Contract type deleted");
    if !orphaned_template_ids.is_empty() {
        tracing::warn!(
            id = %id,
            orphaned = ?orphaned_template_ids,
            "Deleted contract type still referenced by templates"
        );
    }

    Ok(Json(DataResponse {
        data: DeletedContractType {
            id,
            orphaned_template_ids,
        },
    }))
}
