//! Route table and middleware stack

use std::path::Path;

use axum::Router;
use axum::routing::{delete, get, put};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::handlers::{
    api_not_found, create_donor, create_inventory_unit, create_request, delete_donor,
    delete_inventory_unit, delete_request, health_handler, list_donors, list_inventory,
    list_requests, update_request,
};
use crate::state::AppState;

/// Routes served under `/api`
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/donors", get(list_donors).post(create_donor))
        .route("/donors/:id", delete(delete_donor))
        .route("/inventory", get(list_inventory).post(create_inventory_unit))
        .route("/inventory/:id", delete(delete_inventory_unit))
        .route("/requests", get(list_requests).post(create_request))
        .route("/requests/:id", put(update_request).delete(delete_request))
        .fallback(api_not_found)
        .with_state(state)
}

/// Full application: the API plus, when `static_dir` is given, the
/// single-page app with `index.html` served for unknown paths.
pub fn build_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let app = Router::new().nest("/api", api_router(state));

    let app = match static_dir {
        Some(dir) => app.fallback_service(
            ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html"))),
        ),
        None => app,
    };

    app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    )
}
