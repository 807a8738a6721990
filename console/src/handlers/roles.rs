//! Role management handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use shared::forms::RoleForm;
use shared::models::{Permission, Role};

use super::{respond, validate_form, ConsoleResponse, IdsRequest};
use crate::error::AppResult;
use crate::middleware::CurrentSession;
use crate::services::RoleService;
use crate::AppState;

pub async fn list_roles(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> AppResult<Json<ConsoleResponse<Vec<Role>>>> {
    let ctx = state.context(&session);
    let result = RoleService::new(&ctx).list().await;
    respond(&state, &session, &ctx, result)
}

/// Get all available permissions
pub async fn list_permissions(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> AppResult<Json<ConsoleResponse<Vec<Permission>>>> {
    let ctx = state.context(&session);
    let result = RoleService::new(&ctx).permissions().await;
    respond(&state, &session, &ctx, result)
}

pub async fn get_role(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<String>,
) -> AppResult<Json<ConsoleResponse<Role>>> {
    let ctx = state.context(&session);
    let result = RoleService::new(&ctx).get(&id).await;
    respond(&state, &session, &ctx, result)
}

pub async fn create_role(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(form): Json<RoleForm>,
) -> AppResult<(StatusCode, Json<ConsoleResponse<Role>>)> {
    validate_form(&state, &form)?;

    let ctx = state.context(&session);
    let result = RoleService::new(&ctx).create(&form).await;
    respond(&state, &session, &ctx, result).map(|body| (StatusCode::CREATED, body))
}

pub async fn update_role(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<String>,
    Json(form): Json<RoleForm>,
) -> AppResult<Json<ConsoleResponse<Role>>> {
    validate_form(&state, &form)?;

    let ctx = state.context(&session);
    let result = RoleService::new(&ctx).update(&id, &form).await;
    respond(&state, &session, &ctx, result)
}

pub async fn deactivate_roles(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(request): Json<IdsRequest>,
) -> AppResult<Json<ConsoleResponse<()>>> {
    let ctx = state.context(&session);
    let result = RoleService::new(&ctx).deactivate(&request.ids).await;
    respond(&state, &session, &ctx, result)
}

pub async fn reactivate_roles(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(request): Json<IdsRequest>,
) -> AppResult<Json<ConsoleResponse<()>>> {
    let ctx = state.context(&session);
    let result = RoleService::new(&ctx).reactivate(&request.ids).await;
    respond(&state, &session, &ctx, result)
}
