pub mod categories;
pub mod channels;
pub mod operational_quantities;
pub mod sales_plans;
pub mod set_products;
pub mod users;

use axum::{middleware, routing::get, Router};

use crate::middleware::auth::require_auth;
use crate::state::AppState;

/// Every endpoint under `/api`. Only login, health and the banner are open.
pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .merge(set_products::routes())
        .merge(operational_quantities::routes())
        .merge(sales_plans::routes())
        .merge(categories::routes())
        .merge(channels::routes())
        .merge(users::protected_routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let api = Router::new()
        .route("/", get(|| async { "Retail Dashboard API" }))
        .route("/health", get(health_check))
        .merge(users::open_routes())
        .merge(protected);

    Router::new().nest("/api", api).with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod db_tests;
