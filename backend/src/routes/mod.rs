//! Route definitions for the tire retailer back-office

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes. The state is threaded through so the auth layer can
/// verify tokens against the configured signing secret.
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Access gate (login public, logout protected)
        .nest("/auth", auth_routes(state.clone()))
        // Protected routes - stock browsing
        .nest("/articles", article_routes(state.clone()))
        .nest("/movements", movement_routes(state.clone()))
        // Protected routes - supplier invoice imports
        .nest("/imports", import_routes(state.clone()))
        // Protected routes - cart and checkout
        .nest("/cart", cart_routes(state.clone()))
        // Protected routes - invoice history
        .nest("/invoices", invoice_routes(state.clone()))
        // Protected routes - client directory
        .nest("/clients", client_routes(state.clone()))
        // Protected routes - workshop service catalog
        .nest("/services", service_routes(state.clone()))
        // Protected routes - analytics
        .nest("/analytics", analytics_routes(state))
}

/// Access gate routes
fn auth_routes(state: AppState) -> Router<AppState> {
    Router::new().route("/login", post(handlers::login)).merge(
        Router::new()
            .route("/logout", post(handlers::logout))
            .route_layer(middleware::from_fn_with_state(state, auth_middleware)),
    )
}

/// Stock browsing routes (protected)
fn article_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_articles))
        .route("/:article_id", get(handlers::get_article))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Movement history routes (protected)
fn movement_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_movements))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Supplier import routes (protected)
fn import_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_imports).post(handlers::commit_import))
        .route("/preview", post(handlers::preview_import))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Cart and checkout routes (protected)
fn cart_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_cart).delete(handlers::clear_cart))
        .route("/tires", post(handlers::add_tire_line))
        .route("/services", post(handlers::add_service_line))
        .route("/checkout", post(handlers::checkout))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Invoice history routes (protected)
fn invoice_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_invoices))
        .route("/:invoice_id", get(handlers::get_invoice))
        .route("/:invoice_id/pdf", get(handlers::invoice_pdf))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Client directory routes (protected)
fn client_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_clients).post(handlers::create_client))
        .route(
            "/:client_id",
            get(handlers::get_client).put(handlers::update_client),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Workshop service catalog routes (protected)
fn service_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_services).post(handlers::create_service))
        .route("/:service_id", put(handlers::update_service))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Analytics routes (protected)
fn analytics_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/revenue", get(handlers::revenue))
        .route("/top-dimensions", get(handlers::top_dimensions))
        .route("/stock-value", get(handlers::stock_value))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
