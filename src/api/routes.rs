use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{db_session_middleware, make_span_with_request_id, request_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .merge(car_routes(state.clone()))
        .layer(
            ServiceBuilder::new()
                .layer(CorsLayer::permissive())
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id)),
        )
        .with_state(state)
}

/// Every route here runs with a pooled connection checked out
fn car_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/cars", get(handlers::list_cars))
        .route("/car", post(handlers::create_car))
        .route(
            "/car/:id",
            put(handlers::update_car).delete(handlers::delete_car),
        )
        .route_layer(middleware::from_fn_with_state(state, db_session_middleware))
}
