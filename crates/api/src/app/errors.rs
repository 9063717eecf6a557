use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use propinv_infra::{BlobStoreError, LifecycleError};

pub fn lifecycle_error_to_response(err: LifecycleError) -> axum::response::Response {
    match err {
        LifecycleError::NotFound(id) => json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("inventory {id} not found"),
        ),
        LifecycleError::InvalidLink => json_error(
            StatusCode::NOT_FOUND,
            "invalid_link",
            "invalid or expired link",
        ),
        LifecycleError::Forbidden(msg) => json_error(StatusCode::FORBIDDEN, "forbidden", msg),
        LifecycleError::NotSigned => {
            json_error(StatusCode::NOT_FOUND, "not_signed", "document not signed")
        }
        LifecycleError::Validation(msg) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", msg)
        }
        LifecycleError::Store(e) => {
            tracing::error!(error = %e, "inventory store failure");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "store_error",
                e.to_string(),
            )
        }
    }
}

pub fn blob_error_to_response(err: BlobStoreError) -> axum::response::Response {
    tracing::error!(error = %err, "blob store failure");
    json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "blob_store_error",
        err.to_string(),
    )
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn invalid_id() -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid inventory id")
}
