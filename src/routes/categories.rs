use axum::{
    routing::{delete, get},
    Router,
};

use crate::handlers::category::{create_category, delete_category, list_categories};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route("/categories/{id}", delete(delete_category))
}
