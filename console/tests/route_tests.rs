//! Router tests
//!
//! Exercise the console surface that never reaches the inventory backend:
//! health, client settings, session enforcement, form validation and the
//! stateless working-set endpoints.

use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use inv_console::{create_app, http::ApiClient, AppState, Config};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app_with(config: Config) -> Router {
    // Nothing listens here; none of these requests may reach the backend
    let api = ApiClient::new("http://127.0.0.1:9", Duration::from_millis(200)).unwrap();
    create_app(AppState::new(api, config))
}

fn app() -> Router {
    app_with(Config::default())
}

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>, token: bool) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if token {
        builder = builder.header(header::AUTHORIZATION, "Bearer session-token");
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn detailed(id: &str, storage: &str, stock: i64) -> Value {
    json!({
        "id": id,
        "name": format!("Producto {}", id),
        "isActive": true,
        "stock": [{ "storageId": storage, "stock": stock }]
    })
}

fn record_form(movements: Value) -> Value {
    json!({
        "storageId": "wh-1",
        "date": "2024-05-01T10:00:00Z",
        "state": false,
        "movements": movements
    })
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[tokio::test]
    async fn test_health_check() {
        let (status, body) = send(app(), Method::GET, "/health", None, false).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_client_settings_are_public() {
        let mut config = Config::default();
        config.features.form_diagnostics = true;

        let (status, body) = send(app_with(config), Method::GET, "/api/v1/config", None, false).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["formDiagnostics"], true);
        assert_eq!(body["compensateOnFailure"], false);
    }

    #[tokio::test]
    async fn test_diagnostics_off_outside_development() {
        let mut config = Config::default();
        config.environment = "production".into();
        config.features.form_diagnostics = true;

        let (_, body) = send(app_with(config), Method::GET, "/api/v1/config", None, false).await;
        assert_eq!(body["formDiagnostics"], false);
    }

    #[tokio::test]
    async fn test_missing_bearer_is_unauthorized() {
        let (status, body) = send(app(), Method::GET, "/api/v1/incoming", None, false).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");
        assert_eq!(
            body["error"]["message"],
            "No tienes permisos para realizar esta acción"
        );
    }

    #[tokio::test]
    async fn test_invalid_form_is_rejected_before_backend() {
        let (status, body) = send(
            app(),
            Method::POST,
            "/api/v1/incoming",
            Some(record_form(json!([]))),
            true,
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        // Field map only with diagnostics enabled
        assert!(body["error"].get("fields").is_none());
    }

    #[tokio::test]
    async fn test_diagnostics_expose_field_errors() {
        let mut config = Config::default();
        config.features.form_diagnostics = true;

        let movements = json!([{ "productId": "p1", "quantity": 0 }]);
        let (status, body) = send(
            app_with(config),
            Method::POST,
            "/api/v1/outgoing",
            Some(record_form(movements)),
            true,
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"]["fields"]["movements.0.quantity"].is_array());
    }

    #[tokio::test]
    async fn test_transfer_between_same_warehouse_is_rejected() {
        let form = json!({
            "originStorageId": "wh-1",
            "destinationStorageId": "wh-1",
            "date": "2024-05-01T10:00:00Z",
            "movements": [{ "productId": "p1", "quantity": 2 }]
        });
        let (status, _) = send(app(), Method::POST, "/api/v1/transfers", Some(form), true).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_incoming_selection_dedups_and_rebuilds_rows() {
        let product = json!({ "id": "p1", "name": "Café", "isActive": true });
        let request = json!({
            "set": [product.clone()],
            "action": { "type": "append", "payload": [product, { "id": "p2", "name": "Azúcar", "isActive": true }] }
        });

        let (status, body) = send(app(), Method::POST, "/api/v1/selections/incoming", Some(request), true).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["set"].as_array().unwrap().len(), 2);
        assert_eq!(body["data"]["rows"][1]["productId"], "p2");
        assert_eq!(body["data"]["rows"][1]["quantity"], 1);
    }

    #[tokio::test]
    async fn test_incoming_selection_rejects_replace() {
        let request = json!({ "action": { "type": "replace", "payload": [] } });
        let (status, body) = send(app(), Method::POST, "/api/v1/selections/incoming", Some(request), true).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "SELECTION_ERROR");
    }

    #[tokio::test]
    async fn test_outgoing_selection_excludes_zero_stock() {
        let request = json!({
            "action": {
                "type": "append",
                "payload": [detailed("p1", "wh-1", 0), detailed("p2", "wh-1", 4)]
            },
            "storageId": "wh-1"
        });

        let (status, body) = send(app(), Method::POST, "/api/v1/selections/outgoing", Some(request), true).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["hasZeroStockSelected"], true);
        assert_eq!(body["data"]["set"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"]["set"][0]["id"], "p2");
        assert_eq!(body["toasts"][0]["level"], "warning");
    }

    #[tokio::test]
    async fn test_revalidate_after_warehouse_change() {
        let request = json!({
            "set": [detailed("p1", "wh-2", 0), detailed("p2", "wh-1", 0)],
            "storageId": "wh-2"
        });

        let (status, body) = send(
            app(),
            Method::POST,
            "/api/v1/selections/outgoing/revalidate",
            Some(request),
            true,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["set"][0]["id"], "p2");
        assert_eq!(body["data"]["hasZeroStockSelected"], true);
    }
}
