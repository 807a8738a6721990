//! Design project handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use shared::forms::DesignProjectForm;
use shared::models::DesignProject;

use super::{respond, validate_form, ConsoleResponse, IdsRequest};
use crate::error::AppResult;
use crate::middleware::CurrentSession;
use crate::services::DesignProjectService;
use crate::AppState;

pub async fn list_design_projects(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> AppResult<Json<ConsoleResponse<Vec<DesignProject>>>> {
    let ctx = state.context(&session);
    let result = DesignProjectService::new(&ctx).list().await;
    respond(&state, &session, &ctx, result)
}

pub async fn get_design_project(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<String>,
) -> AppResult<Json<ConsoleResponse<DesignProject>>> {
    let ctx = state.context(&session);
    let result = DesignProjectService::new(&ctx).get(&id).await;
    respond(&state, &session, &ctx, result)
}

pub async fn create_design_project(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(form): Json<DesignProjectForm>,
) -> AppResult<(StatusCode, Json<ConsoleResponse<DesignProject>>)> {
    validate_form(&state, &form)?;

    let ctx = state.context(&session);
    let result = DesignProjectService::new(&ctx).create(&form).await;
    respond(&state, &session, &ctx, result).map(|body| (StatusCode::CREATED, body))
}

pub async fn update_design_project(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<String>,
    Json(form): Json<DesignProjectForm>,
) -> AppResult<Json<ConsoleResponse<DesignProject>>> {
    validate_form(&state, &form)?;

    let ctx = state.context(&session);
    let result = DesignProjectService::new(&ctx).update(&id, &form).await;
    respond(&state, &session, &ctx, result)
}

pub async fn deactivate_design_projects(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(request): Json<IdsRequest>,
) -> AppResult<Json<ConsoleResponse<()>>> {
    let ctx = state.context(&session);
    let result = DesignProjectService::new(&ctx)
        .deactivate(&request.ids)
        .await;
    respond(&state, &session, &ctx, result)
}

pub async fn reactivate_design_projects(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(request): Json<IdsRequest>,
) -> AppResult<Json<ConsoleResponse<()>>> {
    let ctx = state.context(&session);
    let result = DesignProjectService::new(&ctx)
        .reactivate(&request.ids)
        .await;
    respond(&state, &session, &ctx, result)
}
