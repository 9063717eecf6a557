use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    response::IntoResponse,
    routing::{get, post},
};

use propinv_inventory::InventoryId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_inventory).get(list_inventories))
        .route(
            "/:id",
            get(get_inventory)
                .put(update_inventory)
                .delete(delete_inventory),
        )
        .route("/:id/generate-link", post(generate_link))
}

fn parse_id(id: &str) -> Result<InventoryId, axum::response::Response> {
    id.parse().map_err(|_| errors::invalid_id())
}

pub async fn create_inventory(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateInventoryRequest>,
) -> axum::response::Response {
    match services.lifecycle.create(body.into()).await {
        Ok(inventory) => Json(inventory).into_response(),
        Err(e) => errors::lifecycle_error_to_response(e),
    }
}

pub async fn list_inventories(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.lifecycle.list().await {
        Ok(inventories) => Json(inventories).into_response(),
        Err(e) => errors::lifecycle_error_to_response(e),
    }
}

pub async fn get_inventory(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.lifecycle.get(id).await {
        Ok(inventory) => Json(inventory).into_response(),
        Err(e) => errors::lifecycle_error_to_response(e),
    }
}

pub async fn update_inventory(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateInventoryRequest>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.lifecycle.update_inventory(id, body.into()).await {
        Ok(inventory) => Json(inventory).into_response(),
        Err(e) => errors::lifecycle_error_to_response(e),
    }
}

pub async fn delete_inventory(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.lifecycle.delete(id).await {
        Ok(deleted_count) => Json(serde_json::json!({
            "message": "Inventory deleted successfully",
            "deleted_count": deleted_count,
        }))
        .into_response(),
        Err(e) => errors::lifecycle_error_to_response(e),
    }
}

pub async fn generate_link(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.lifecycle.generate_link(id).await {
        Ok(link) => Json(serde_json::json!({
            "shareable_link": link.shareable_link,
            "token": link.token,
        }))
        .into_response(),
        Err(e) => errors::lifecycle_error_to_response(e),
    }
}
