use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    response::IntoResponse,
    routing::{get, post},
};

use propinv_inventory::ShareToken;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

/// Token-addressed routes used by signers; no id is ever exposed here.
pub fn router() -> Router {
    Router::new()
        .route("/sign/:token", get(get_by_token))
        .route("/sign/:token/submit", post(submit_signature))
        .route("/sign/:token/lock", post(lock_signature))
        .route("/verify/:token", get(verify_signature))
}

pub async fn get_by_token(
    Extension(services): Extension<Arc<AppServices>>,
    Path(token): Path<String>,
) -> axum::response::Response {
    match services.lifecycle.fetch_by_token(&ShareToken::new(token)).await {
        Ok(inventory) => Json(inventory).into_response(),
        Err(e) => errors::lifecycle_error_to_response(e),
    }
}

pub async fn submit_signature(
    Extension(services): Extension<Arc<AppServices>>,
    Path(token): Path<String>,
    Json(body): Json<dto::SubmitSignatureRequest>,
) -> axum::response::Response {
    let token = ShareToken::new(token);

    match services.lifecycle.submit_signature(&token, body.into()).await {
        Ok(receipt) => Json(serde_json::json!({
            "message": "Signature submitted successfully",
            "verification_link": receipt.verification_link,
            "signature_count": receipt.signature_count,
        }))
        .into_response(),
        Err(e) => errors::lifecycle_error_to_response(e),
    }
}

pub async fn lock_signature(
    Extension(services): Extension<Arc<AppServices>>,
    Path(token): Path<String>,
) -> axum::response::Response {
    match services.lifecycle.lock(&ShareToken::new(token)).await {
        Ok(signature) => Json(serde_json::json!({
            "message": "Signature locked",
            "signature": signature,
        }))
        .into_response(),
        Err(e) => errors::lifecycle_error_to_response(e),
    }
}

pub async fn verify_signature(
    Extension(services): Extension<Arc<AppServices>>,
    Path(token): Path<String>,
) -> axum::response::Response {
    match services.lifecycle.verify(&ShareToken::new(token)).await {
        Ok(verification) => Json(verification).into_response(),
        Err(e) => errors::lifecycle_error_to_response(e),
    }
}
