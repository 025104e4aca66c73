mod aggregate;
mod dto;
pub mod handlers;
mod range;
mod repo;

use axum::{routing::get, Router};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/nutrition",
        get(handlers::list_logs)
            .post(handlers::create_log)
            .put(handlers::update_log)
            .delete(handlers::delete_log),
    )
}
