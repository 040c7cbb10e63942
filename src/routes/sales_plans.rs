use axum::{routing::get, Router};

use crate::handlers::sales_plan::{create_plan, delete_plan, get_plan, list_plans, update_plan};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sales/plans", get(list_plans).post(create_plan))
        .route("/sales/plans/{id}", get(get_plan).put(update_plan).delete(delete_plan))
}
