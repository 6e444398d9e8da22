// ============================
// linkkeeper-backend/src/router.rs
// ============================
//! HTTP router.
use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use linkkeeper_common::Identity;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::token_gate;
use crate::handlers::{health, links};
use crate::storage::LinkStore;
use crate::AppState;

/// Create the application router
pub fn create_router<S: LinkStore + 'static>(state: Arc<AppState<S>>) -> Router {
    let protected = Router::new()
        .route(
            "/links",
            get(links::list_links::<S>)
                .post(links::create_link::<S>)
                .delete(links::delete_links::<S>),
        )
        .route(
            "/links/",
            get(links::list_links::<S>)
                .post(links::create_link::<S>)
                .delete(links::delete_links::<S>),
        )
        .route(
            "/links/{id}",
            get(links::get_link::<S>).delete(links::delete_link::<S>),
        )
        .route_layer(middleware::from_fn_with_state(
            state.gate.clone(),
            token_gate::<Identity>,
        ));

    Router::new()
        .route("/health", get(health))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
