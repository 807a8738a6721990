//! Selected-products working sets for clients that don't run the WASM module
//!
//! The set travels with every request; the console keeps no selection
//! state of its own.

use axum::Json;
use serde::{Deserialize, Serialize};
use shared::models::{Product, ProductDetailed};
use shared::selection::{
    rebuild_movement_rows, MovementRow, ProductSelections, SelectionAction, WorkingSet,
};
use shared::zero_stock::ZeroStockGuard;

use super::ConsoleResponse;
use crate::error::AppResult;
use crate::notify::ToastLog;

#[derive(Debug, Deserialize)]
pub struct IncomingSelectionRequest {
    #[serde(default)]
    pub set: WorkingSet<Product>,
    pub action: SelectionAction<Product>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutgoingSelectionRequest {
    #[serde(default)]
    pub set: WorkingSet<ProductDetailed>,
    pub action: SelectionAction<ProductDetailed>,
    /// Origin warehouse; products are screened for zero stock when present
    pub storage_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevalidateRequest {
    pub set: WorkingSet<ProductDetailed>,
    pub storage_id: String,
}

/// Working set after an action, plus the movement rows rebuilt from it
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionState<T> {
    pub set: WorkingSet<T>,
    pub rows: Vec<MovementRow>,
    pub has_zero_stock_selected: bool,
}

pub async fn dispatch_incoming_selection(
    Json(request): Json<IncomingSelectionRequest>,
) -> AppResult<Json<ConsoleResponse<SelectionState<Product>>>> {
    let mut selections = ProductSelections {
        incoming: request.set,
        ..ProductSelections::default()
    };
    selections.dispatch_incoming(request.action)?;

    let rows = rebuild_movement_rows(&selections.incoming);
    Ok(Json(ConsoleResponse {
        data: SelectionState {
            set: selections.incoming,
            rows,
            has_zero_stock_selected: false,
        },
        toasts: Vec::new(),
    }))
}

pub async fn dispatch_outgoing_selection(
    Json(request): Json<OutgoingSelectionRequest>,
) -> AppResult<Json<ConsoleResponse<SelectionState<ProductDetailed>>>> {
    let mut guard = ZeroStockGuard::new();
    let action = match (request.action, request.storage_id.as_deref()) {
        (SelectionAction::Append(rows), Some(storage_id)) => {
            SelectionAction::Append(guard.commit(rows, storage_id))
        }
        (SelectionAction::Replace(rows), Some(storage_id)) => {
            SelectionAction::Replace(guard.commit(rows, storage_id))
        }
        (action, _) => action,
    };

    let mut selections = ProductSelections {
        outgoing: request.set,
        ..ProductSelections::default()
    };
    selections.dispatch_outgoing(action);

    Ok(Json(outgoing_state(selections.outgoing, &guard)))
}

/// Re-screen the staged Outgoing set after the origin warehouse changed
pub async fn revalidate_outgoing_selection(
    Json(request): Json<RevalidateRequest>,
) -> AppResult<Json<ConsoleResponse<SelectionState<ProductDetailed>>>> {
    let mut guard = ZeroStockGuard::new();
    let set = guard.revalidate(&request.set, &request.storage_id);
    Ok(Json(outgoing_state(set, &guard)))
}

fn outgoing_state(
    set: WorkingSet<ProductDetailed>,
    guard: &ZeroStockGuard,
) -> ConsoleResponse<SelectionState<ProductDetailed>> {
    let toasts = ToastLog::new();
    if let Some(warning) = guard.warning() {
        toasts.warning(warning);
    }
    let rows = rebuild_movement_rows(&set);
    ConsoleResponse {
        data: SelectionState {
            set,
            rows,
            has_zero_stock_selected: guard.has_zero_stock_selected(),
        },
        toasts: toasts.drain(),
    }
}
