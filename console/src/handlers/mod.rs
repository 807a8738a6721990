//! HTTP handlers of the console API
//!
//! Every handler answers with the data plus the toasts raised while
//! serving the request, so the browser can show them.

pub mod design_projects;
pub mod health;
pub mod products;
pub mod records;
pub mod roles;
pub mod selections;
pub mod settings;
pub mod stock;
pub mod transfers;

pub use design_projects::*;
pub use health::*;
pub use products::*;
pub use records::*;
pub use roles::*;
pub use selections::*;
pub use settings::*;
pub use stock::*;
pub use transfers::*;

use axum::Json;
use serde::{Deserialize, Serialize};
use shared::forms::field_errors;
use validator::Validate;

use crate::error::{ApiError, ApiResult, AppError, AppResult};
use crate::middleware::Session;
use crate::notify::Toast;
use crate::services::ServiceContext;
use crate::AppState;

/// Response body of every console endpoint
#[derive(Debug, Serialize)]
pub struct ConsoleResponse<T> {
    pub data: T,
    pub toasts: Vec<Toast>,
}

/// Body of the bulk deactivate/reactivate endpoints
#[derive(Debug, Deserialize)]
pub struct IdsRequest {
    pub ids: Vec<String>,
}

/// Reject an invalid form before anything reaches the backend
pub(crate) fn validate_form<F: Validate>(state: &AppState, form: &F) -> AppResult<()> {
    form.validate().map_err(|errors| {
        let fields = field_errors(&errors);
        tracing::debug!(?fields, "form rejected");
        AppError::Validation {
            fields,
            diagnostics: state.config.form_diagnostics_enabled(),
        }
    })
}

/// Wrap a service result together with the toasts it raised.
/// A rejected token also drops the session's cache.
pub(crate) fn respond<T>(
    state: &AppState,
    session: &Session,
    ctx: &ServiceContext,
    result: ApiResult<T>,
) -> AppResult<Json<ConsoleResponse<T>>> {
    match result {
        Ok(data) => Ok(Json(ConsoleResponse {
            data,
            toasts: ctx.toasts.drain(),
        })),
        Err(err) => {
            if matches!(err, ApiError::Unauthorized) {
                state.caches.forget(&session.token);
            }
            Err(AppError::Api(err))
        }
    }
}
