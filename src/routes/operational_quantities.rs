use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::handlers::operational_quantity::{
    create_operational_quantity, delete_operational_quantity, list_operational_quantities,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/operational-quantity", post(create_operational_quantity))
        .route("/operational-quantity/list", get(list_operational_quantities))
        .route("/operational-quantity/{id}", delete(delete_operational_quantity))
}
