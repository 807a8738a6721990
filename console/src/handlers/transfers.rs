//! Transfer handlers

use axum::{extract::State, http::StatusCode, Json};
use shared::forms::TransferForm;

use super::{respond, validate_form, ConsoleResponse};
use crate::error::AppResult;
use crate::middleware::CurrentSession;
use crate::services::{TransferOutcome, TransferService};
use crate::AppState;

/// Create an Outgoing/Incoming pair moving stock between two warehouses
pub async fn create_transfer(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(form): Json<TransferForm>,
) -> AppResult<(StatusCode, Json<ConsoleResponse<TransferOutcome>>)> {
    validate_form(&state, &form)?;

    let ctx = state.context(&session);
    let result = TransferService::from_context(&ctx)
        .create_transfer(&form)
        .await;
    respond(&state, &session, &ctx, result).map(|body| (StatusCode::CREATED, body))
}
