//! Route definitions for the inventory console

use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};
use shared::models::{Incoming, Outgoing};

use crate::{handlers, middleware::session_middleware, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Client settings (public)
        .route("/config", get(handlers::client_settings))
        // Everything else forwards the browser session
        .merge(protected_routes())
}

fn protected_routes() -> Router<AppState> {
    Router::new()
        .nest("/incoming", incoming_routes())
        .nest("/outgoing", outgoing_routes())
        .route("/transfers", post(handlers::create_transfer))
        .nest("/products", product_routes())
        .nest("/stock", stock_routes())
        .nest("/roles", role_routes())
        .nest("/design-projects", design_project_routes())
        .nest("/selections", selection_routes())
        .route_layer(middleware::from_fn(session_middleware))
}

/// Stock entries
fn incoming_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_records::<Incoming>).post(handlers::create_record::<Incoming>),
        )
        .route("/detailed", get(handlers::list_detailed_records::<Incoming>))
        .route("/deactivate", patch(handlers::deactivate_records::<Incoming>))
        .route("/reactivate", patch(handlers::reactivate_records::<Incoming>))
        .route(
            "/:id",
            get(handlers::get_record::<Incoming>).patch(handlers::update_record::<Incoming>),
        )
}

/// Stock exits
fn outgoing_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_records::<Outgoing>).post(handlers::create_record::<Outgoing>),
        )
        .route("/detailed", get(handlers::list_detailed_records::<Outgoing>))
        .route("/deactivate", patch(handlers::deactivate_records::<Outgoing>))
        .route("/reactivate", patch(handlers::reactivate_records::<Outgoing>))
        .route(
            "/:id",
            get(handlers::get_record::<Outgoing>).patch(handlers::update_record::<Outgoing>),
        )
}

fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_products).post(handlers::create_product))
        .route("/detailed", get(handlers::list_detailed_products))
        .route("/available", get(handlers::available_products))
        .route("/deactivate", patch(handlers::deactivate_products))
        .route("/reactivate", patch(handlers::reactivate_products))
        .route(
            "/:id",
            get(handlers::get_product).patch(handlers::update_product),
        )
}

fn stock_routes() -> Router<AppState> {
    Router::new()
        .route("/storages", get(handlers::storages_stock))
        .route("/storage/:storage_id", get(handlers::storage_stock))
        .route(
            "/storage/:storage_id/product/:product_id",
            get(handlers::product_stock_in_storage),
        )
        .route("/product/:product_id", get(handlers::product_stock))
}

/// Role management routes
fn role_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_roles).post(handlers::create_role))
        .route("/permissions", get(handlers::list_permissions))
        .route("/deactivate", patch(handlers::deactivate_roles))
        .route("/reactivate", patch(handlers::reactivate_roles))
        .route("/:id", get(handlers::get_role).patch(handlers::update_role))
}

fn design_project_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_design_projects).post(handlers::create_design_project),
        )
        .route("/deactivate", patch(handlers::deactivate_design_projects))
        .route("/reactivate", patch(handlers::reactivate_design_projects))
        .route(
            "/:id",
            get(handlers::get_design_project).patch(handlers::update_design_project),
        )
}

/// Working-set reducers (stateless)
fn selection_routes() -> Router<AppState> {
    Router::new()
        .route("/incoming", post(handlers::dispatch_incoming_selection))
        .route("/outgoing", post(handlers::dispatch_outgoing_selection))
        .route(
            "/outgoing/revalidate",
            post(handlers::revalidate_outgoing_selection),
        )
}
