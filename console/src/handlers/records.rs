//! Incoming and Outgoing handlers
//!
//! Generic over the record kind; routes instantiate them with `Incoming`
//! or `Outgoing`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use shared::forms::RecordForm;
use shared::models::MovementRecord;

use super::{respond, validate_form, ConsoleResponse, IdsRequest};
use crate::error::AppResult;
use crate::middleware::CurrentSession;
use crate::services::{CascadeReport, RecordService};
use crate::AppState;

pub async fn list_records<R: MovementRecord>(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> AppResult<Json<ConsoleResponse<Vec<R>>>> {
    let ctx = state.context(&session);
    let result = RecordService::<R>::new(&ctx).list().await;
    respond(&state, &session, &ctx, result)
}

/// Records with their movements and warehouse
pub async fn list_detailed_records<R: MovementRecord>(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> AppResult<Json<ConsoleResponse<Vec<R::Detailed>>>> {
    let ctx = state.context(&session);
    let result = RecordService::<R>::new(&ctx).list_detailed().await;
    respond(&state, &session, &ctx, result)
}

pub async fn get_record<R: MovementRecord>(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<String>,
) -> AppResult<Json<ConsoleResponse<R::Detailed>>> {
    let ctx = state.context(&session);
    let result = RecordService::<R>::new(&ctx).get(&id).await;
    respond(&state, &session, &ctx, result)
}

pub async fn create_record<R: MovementRecord>(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(form): Json<RecordForm>,
) -> AppResult<(StatusCode, Json<ConsoleResponse<R>>)> {
    validate_form(&state, &form)?;

    let ctx = state.context(&session);
    let result = RecordService::<R>::new(&ctx).create(form).await;
    respond(&state, &session, &ctx, result).map(|body| (StatusCode::CREATED, body))
}

pub async fn update_record<R: MovementRecord>(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<String>,
    Json(form): Json<RecordForm>,
) -> AppResult<Json<ConsoleResponse<R>>> {
    validate_form(&state, &form)?;

    let ctx = state.context(&session);
    let result = RecordService::<R>::new(&ctx).update(&id, form).await;
    respond(&state, &session, &ctx, result)
}

/// Soft-delete records, cascading to paired transferences
pub async fn deactivate_records<R: MovementRecord>(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(request): Json<IdsRequest>,
) -> AppResult<Json<ConsoleResponse<CascadeReport>>> {
    let ctx = state.context(&session);
    let result = RecordService::<R>::new(&ctx)
        .deactivate(&request.ids)
        .await;
    respond(&state, &session, &ctx, result)
}

pub async fn reactivate_records<R: MovementRecord>(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(request): Json<IdsRequest>,
) -> AppResult<Json<ConsoleResponse<CascadeReport>>> {
    let ctx = state.context(&session);
    let result = RecordService::<R>::new(&ctx)
        .reactivate(&request.ids)
        .await;
    respond(&state, &session, &ctx, result)
}
