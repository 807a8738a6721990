//! Stock view handlers

use axum::{
    extract::{Path, State},
    Json,
};
use shared::models::{ProductStock, StockEntry, StorageStock};

use super::{respond, ConsoleResponse};
use crate::error::AppResult;
use crate::middleware::CurrentSession;
use crate::services::StockService;
use crate::AppState;

pub async fn storages_stock(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> AppResult<Json<ConsoleResponse<Vec<StorageStock>>>> {
    let ctx = state.context(&session);
    let result = StockService::new(&ctx).storages().await;
    respond(&state, &session, &ctx, result)
}

pub async fn storage_stock(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(storage_id): Path<String>,
) -> AppResult<Json<ConsoleResponse<Vec<ProductStock>>>> {
    let ctx = state.context(&session);
    let result = StockService::new(&ctx).by_storage(&storage_id).await;
    respond(&state, &session, &ctx, result)
}

pub async fn product_stock(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(product_id): Path<String>,
) -> AppResult<Json<ConsoleResponse<Vec<StockEntry>>>> {
    let ctx = state.context(&session);
    let result = StockService::new(&ctx).by_product(&product_id).await;
    respond(&state, &session, &ctx, result)
}

pub async fn product_stock_in_storage(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path((storage_id, product_id)): Path<(String, String)>,
) -> AppResult<Json<ConsoleResponse<ProductStock>>> {
    let ctx = state.context(&session);
    let result = StockService::new(&ctx)
        .for_product_in_storage(&storage_id, &product_id)
        .await;
    respond(&state, &session, &ctx, result)
}
