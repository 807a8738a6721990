//! WebAssembly module for the inventory console
//!
//! Runs the same client-side logic the console server uses, so dialogs can
//! work without a round trip:
//! - Selected-products working sets (Incoming and Outgoing)
//! - Zero-stock screening of Outgoing selections
//! - Movement-row rebuild
//! - Form validation
//! - Backend error-message classification
//!
//! Every export takes and returns JSON strings.

use serde::{de::DeserializeOwned, Serialize};
use shared::forms::{
    field_errors, DesignProjectForm, ProductForm, RecordForm, RoleForm, TransferForm,
};
use shared::messages;
use shared::models::{Product, ProductDetailed};
use shared::selection::{
    rebuild_movement_rows, MovementRow, ProductSelections, SelectionAction, WorkingSet,
};
use shared::zero_stock::{self, ZeroStockGuard};
use std::collections::BTreeMap;
use validator::Validate;
use wasm_bindgen::prelude::*;

/// Working set after an action, with its rebuilt movement rows
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionState<T> {
    pub set: WorkingSet<T>,
    pub rows: Vec<MovementRow>,
    pub has_zero_stock_selected: bool,
    pub warning: Option<String>,
}

fn parse<T: DeserializeOwned>(json: &str, what: &str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid {} JSON: {}", what, e))
}

fn render<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization failed: {}", e))
}

fn js_error(message: String) -> JsValue {
    js_sys::Error::new(&message).into()
}

fn apply_incoming(set_json: &str, action_json: &str) -> Result<SelectionState<Product>, String> {
    let mut selections = ProductSelections {
        incoming: parse(set_json, "working set")?,
        ..ProductSelections::default()
    };
    let action: SelectionAction<Product> = parse(action_json, "action")?;
    selections
        .dispatch_incoming(action)
        .map_err(|e| e.to_string())?;

    Ok(SelectionState {
        rows: rebuild_movement_rows(&selections.incoming),
        set: selections.incoming,
        has_zero_stock_selected: false,
        warning: None,
    })
}

fn apply_outgoing(
    set_json: &str,
    action_json: &str,
    storage_id: Option<&str>,
) -> Result<SelectionState<ProductDetailed>, String> {
    let mut selections = ProductSelections {
        outgoing: parse(set_json, "working set")?,
        ..ProductSelections::default()
    };
    let action: SelectionAction<ProductDetailed> = parse(action_json, "action")?;

    let mut guard = ZeroStockGuard::new();
    let action = match (action, storage_id) {
        (SelectionAction::Append(rows), Some(storage_id)) => {
            SelectionAction::Append(guard.commit(rows, storage_id))
        }
        (SelectionAction::Replace(rows), Some(storage_id)) => {
            SelectionAction::Replace(guard.commit(rows, storage_id))
        }
        (action, _) => action,
    };
    selections.dispatch_outgoing(action);

    Ok(outgoing_state(selections.outgoing, &guard))
}

fn revalidate_outgoing(
    set_json: &str,
    storage_id: &str,
) -> Result<SelectionState<ProductDetailed>, String> {
    let staged: WorkingSet<ProductDetailed> = parse(set_json, "working set")?;
    let mut guard = ZeroStockGuard::new();
    let set = guard.revalidate(&staged, storage_id);
    Ok(outgoing_state(set, &guard))
}

fn outgoing_state(
    set: WorkingSet<ProductDetailed>,
    guard: &ZeroStockGuard,
) -> SelectionState<ProductDetailed> {
    SelectionState {
        rows: rebuild_movement_rows(&set),
        set,
        has_zero_stock_selected: guard.has_zero_stock_selected(),
        warning: guard.warning().map(str::to_string),
    }
}

fn check<F: Validate + DeserializeOwned>(form_json: &str) -> Result<BTreeMap<String, Vec<String>>, String> {
    let form: F = parse(form_json, "form")?;
    Ok(match form.validate() {
        Ok(()) => BTreeMap::new(),
        Err(errors) => field_errors(&errors),
    })
}

fn form_errors(form: &str, form_json: &str) -> Result<BTreeMap<String, Vec<String>>, String> {
    match form {
        "incoming" | "outgoing" => check::<RecordForm>(form_json),
        "transfer" => check::<TransferForm>(form_json),
        "product" => check::<ProductForm>(form_json),
        "role" => check::<RoleForm>(form_json),
        "design-project" => check::<DesignProjectForm>(form_json),
        other => Err(format!("Unknown form: {}", other)),
    }
}

fn warn(message: &str) {
    web_sys::console::warn_1(&JsValue::from_str(message));
}

/// Apply a reducer action to the Incoming working set.
/// `Replace` is rejected for Incoming.
#[wasm_bindgen]
pub fn reduce_incoming_selection(set_json: &str, action_json: &str) -> Result<String, JsValue> {
    apply_incoming(set_json, action_json)
        .and_then(|state| render(&state))
        .map_err(js_error)
}

/// Apply a reducer action to the Outgoing working set, screening appended
/// or replacing rows for zero stock when an origin warehouse is given
#[wasm_bindgen]
pub fn reduce_outgoing_selection(
    set_json: &str,
    action_json: &str,
    storage_id: Option<String>,
) -> Result<String, JsValue> {
    let state = apply_outgoing(set_json, action_json, storage_id.as_deref()).map_err(js_error)?;
    if let Some(warning) = &state.warning {
        warn(warning);
    }
    render(&state).map_err(js_error)
}

/// Re-screen the staged Outgoing set after the origin warehouse changed
#[wasm_bindgen]
pub fn revalidate_outgoing_selection(set_json: &str, storage_id: &str) -> Result<String, JsValue> {
    let state = revalidate_outgoing(set_json, storage_id).map_err(js_error)?;
    if let Some(warning) = &state.warning {
        warn(warning);
    }
    render(&state).map_err(js_error)
}

/// Ids of detailed products with exactly zero stock in `storage_id`
#[wasm_bindgen]
pub fn zero_stock_product_ids(rows_json: &str, storage_id: &str) -> Result<String, JsValue> {
    let rows: Vec<ProductDetailed> = parse(rows_json, "products").map_err(js_error)?;
    render(&zero_stock::zero_stock_ids(&rows, storage_id)).map_err(js_error)
}

/// Movement rows rebuilt from a working set of catalog products
#[wasm_bindgen]
pub fn movement_rows(set_json: &str) -> Result<String, JsValue> {
    let set: WorkingSet<Product> = parse(set_json, "working set").map_err(js_error)?;
    render(&rebuild_movement_rows(&set)).map_err(js_error)
}

/// Validate a form; returns the field-error map (`{}` when valid)
#[wasm_bindgen]
pub fn validate_form(form: &str, form_json: &str) -> Result<String, JsValue> {
    form_errors(form, form_json)
        .and_then(|errors| render(&errors))
        .map_err(js_error)
}

/// Text to show for a backend error message
#[wasm_bindgen]
pub fn display_error_message(message: &str) -> String {
    messages::display_message(message)
}

#[wasm_bindgen]
pub fn is_permission_error(message: &str) -> bool {
    messages::is_permission_message(message)
}

/// Text to show for an HTTP status and backend message
#[wasm_bindgen]
pub fn error_message_for_status(status: u16, message: &str) -> String {
    if status == 401 {
        messages::PERMISSION_DENIED.to_string()
    } else {
        messages::display_message(message)
    }
}
