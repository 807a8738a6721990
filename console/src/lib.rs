//! Inventory admin console
//!
//! Backend-for-frontend of the inventory console: it forwards the browser's
//! session to the inventory REST backend, caches query results per session,
//! keeps the two halves of a stock transfer consistent and reports every
//! outcome as a toast.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod handlers;
pub mod http;
pub mod middleware;
pub mod notify;
pub mod routes;
pub mod services;

pub use crate::config::Config;

use cache::CacheRegistry;
use http::ApiClient;
use middleware::Session;
use services::ServiceContext;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub api: ApiClient,
    pub caches: Arc<CacheRegistry>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(api: ApiClient, config: Config) -> Self {
        Self {
            api,
            caches: Arc::new(CacheRegistry::new(config.cache.enabled)),
            config: Arc::new(config),
        }
    }

    /// Services for one request made on behalf of `session`
    pub fn context(&self, session: &Session) -> ServiceContext {
        let mut ctx = ServiceContext::new(
            self.api.with_token(session.token.clone()),
            self.caches.for_session(&session.token),
        );
        ctx.compensate_on_failure = self.config.cascade.compensate_on_failure;
        ctx
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Inventory Console API v1"
}
