use axum::{Json, Router, response::IntoResponse, routing::get};

use propinv_inventory::PREDEFINED_ROOMS;

pub fn router() -> Router {
    Router::new().route("/predefined", get(predefined_rooms))
}

pub async fn predefined_rooms() -> impl IntoResponse {
    Json(serde_json::json!({ "rooms": PREDEFINED_ROOMS }))
}
