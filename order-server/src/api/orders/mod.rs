//! Orders API 模块

mod handler;

use axum::{
    Router,
    routing::{delete, get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/status", put(handler::update_status))
        .route("/{id}/edit-items", put(handler::edit_items))
        .route("/clear-all/all", delete(handler::clear_all))
        .route("/table/{table_number}", delete(handler::clear_table))
}
