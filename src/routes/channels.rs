use axum::{
    routing::{delete, get},
    Router,
};

use crate::handlers::channel::{create_channel, delete_channel, list_channels};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/channels", get(list_channels).post(create_channel))
        .route("/channels/{id}", delete(delete_channel))
}
