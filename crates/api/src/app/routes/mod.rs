use axum::{Router, routing::get};

pub mod inventories;
pub mod rooms;
pub mod signing;
pub mod system;
pub mod uploads;

/// Router for everything under the `/api` prefix.
pub fn router() -> Router {
    Router::new()
        .route("/", get(system::root))
        .nest("/inventories", inventories::router())
        .nest("/rooms", rooms::router())
        .merge(signing::router())
        .merge(uploads::router())
}
