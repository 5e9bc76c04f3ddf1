use axum::{
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;

use crate::api::handlers;
use crate::store::traits::Store;

/// Route prefix of the field endpoints
pub const FIELD_ROUTES_PREFIX: &str = "/api/Pas";

pub fn create_router<S: Store + 'static>() -> Router<Arc<S>> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // API Documentation
        .route("/docs/openapi.json", get(handlers::get_openapi_spec))
        .nest(FIELD_ROUTES_PREFIX, field_routes::<S>())
        // A panicking handler still answers with a 500
        .layer(CatchPanicLayer::new())
}

pub fn field_routes<S: Store + 'static>() -> Router<Arc<S>> {
    Router::new()
        .route("/type/:field_type", get(handlers::get_fields_by_type::<S>))
        .route(
            "/FormName/:form_name",
            get(handlers::get_fields_by_form_name::<S>),
        )
        .route("/FormId/:form_id", get(handlers::get_fields_by_form_id::<S>))
        .route(
            "/Id/:field_id",
            patch(handlers::update_field::<S>).delete(handlers::delete_field::<S>),
        )
        .route("/Add/:form_name", post(handlers::add_field::<S>))
}
