use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::set_product::{delete_set, list_sets, register_set, set_active};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard/sets", get(list_sets))
        .route("/dashboard/sets/register", post(register_set))
        .route("/dashboard/sets/{id}", delete(delete_set))
        .route("/dashboard/sets/{id}/active", put(set_active))
}
