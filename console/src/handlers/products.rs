//! Product catalog handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use shared::forms::ProductForm;
use shared::models::{Product, ProductDetailed};
use shared::zero_stock::ZeroStockOutcome;

use super::{respond, validate_form, ConsoleResponse, IdsRequest};
use crate::error::AppResult;
use crate::middleware::CurrentSession;
use crate::services::ProductService;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    pub storage_id: String,
}

pub async fn list_products(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> AppResult<Json<ConsoleResponse<Vec<Product>>>> {
    let ctx = state.context(&session);
    let result = ProductService::new(&ctx).list().await;
    respond(&state, &session, &ctx, result)
}

pub async fn list_detailed_products(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> AppResult<Json<ConsoleResponse<Vec<ProductDetailed>>>> {
    let ctx = state.context(&session);
    let result = ProductService::new(&ctx).list_detailed().await;
    respond(&state, &session, &ctx, result)
}

/// Detailed products screened against one origin warehouse
pub async fn available_products(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<ConsoleResponse<ZeroStockOutcome>>> {
    let ctx = state.context(&session);
    let result = ProductService::new(&ctx)
        .available_in(&query.storage_id)
        .await;
    respond(&state, &session, &ctx, result)
}

pub async fn get_product(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<String>,
) -> AppResult<Json<ConsoleResponse<Product>>> {
    let ctx = state.context(&session);
    let result = ProductService::new(&ctx).get(&id).await;
    respond(&state, &session, &ctx, result)
}

pub async fn create_product(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(form): Json<ProductForm>,
) -> AppResult<(StatusCode, Json<ConsoleResponse<Product>>)> {
    validate_form(&state, &form)?;

    let ctx = state.context(&session);
    let result = ProductService::new(&ctx).create(&form).await;
    respond(&state, &session, &ctx, result).map(|body| (StatusCode::CREATED, body))
}

pub async fn update_product(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<String>,
    Json(form): Json<ProductForm>,
) -> AppResult<Json<ConsoleResponse<Product>>> {
    validate_form(&state, &form)?;

    let ctx = state.context(&session);
    let result = ProductService::new(&ctx).update(&id, &form).await;
    respond(&state, &session, &ctx, result)
}

pub async fn deactivate_products(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(request): Json<IdsRequest>,
) -> AppResult<Json<ConsoleResponse<()>>> {
    let ctx = state.context(&session);
    let result = ProductService::new(&ctx).deactivate(&request.ids).await;
    respond(&state, &session, &ctx, result)
}

pub async fn reactivate_products(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(request): Json<IdsRequest>,
) -> AppResult<Json<ConsoleResponse<()>>> {
    let ctx = state.context(&session);
    let result = ProductService::new(&ctx).reactivate(&request.ids).await;
    respond(&state, &session, &ctx, result)
}
