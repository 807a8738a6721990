//! Client settings

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSettings {
    pub environment: String,
    /// Whether forms should render the field-error diagnostic panel
    pub form_diagnostics: bool,
    pub compensate_on_failure: bool,
}

pub async fn client_settings(State(state): State<AppState>) -> Json<ClientSettings> {
    Json(ClientSettings {
        environment: state.config.environment.clone(),
        form_diagnostics: state.config.form_diagnostics_enabled(),
        compensate_on_failure: state.config.cascade.compensate_on_failure,
    })
}
