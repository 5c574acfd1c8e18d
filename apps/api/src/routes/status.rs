use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::models::status::{StatusCheck, StatusCheckCreate};
use crate::state::AppState;
use crate::store::{insert_record, list_records, DEFAULT_LIST_LIMIT};

/// POST /api/status
pub async fn handle_create_status(
    State(state): State<AppState>,
    Json(input): Json<StatusCheckCreate>,
) -> Result<Json<StatusCheck>, AppError> {
    let check = StatusCheck::new(input.client_name);
    insert_record(state.store.as_ref(), &check).await?;
    Ok(Json(check))
}

/// GET /api/status
pub async fn handle_list_status(
    State(state): State<AppState>,
) -> Result<Json<Vec<StatusCheck>>, AppError> {
    let checks = list_records(state.store.as_ref(), DEFAULT_LIST_LIMIT).await?;
    Ok(Json(checks))
}
