use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Extension, Multipart, Path},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;

use propinv_infra::{BlobCategory, BlobRef, BlobStore};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/upload/photo", post(upload_photo))
        .route("/upload/document", post(upload_document))
        .route("/upload/property-photo", post(upload_property_photo))
        .route("/uploads/:category/:filename", get(get_upload))
}

struct UploadedFile {
    original_filename: String,
    bytes: Bytes,
}

#[derive(Default)]
struct UploadForm {
    file: Option<UploadedFile>,
    room_reference: Option<String>,
    description: Option<String>,
}

fn multipart_error(e: axum::extract::multipart::MultipartError) -> axum::response::Response {
    errors::json_error(e.status(), "validation_error", e.body_text())
}

async fn read_form(mut multipart: Multipart) -> Result<UploadForm, axum::response::Response> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let original_filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(multipart_error)?;
                form.file = Some(UploadedFile {
                    original_filename,
                    bytes,
                });
            }
            Some("room_reference") => {
                form.room_reference = Some(field.text().await.map_err(multipart_error)?);
            }
            Some("description") => {
                form.description = Some(field.text().await.map_err(multipart_error)?);
            }
            _ => {}
        }
    }

    Ok(form)
}

fn require_file(form: &mut UploadForm) -> Result<UploadedFile, axum::response::Response> {
    form.file.take().ok_or_else(|| {
        errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "multipart field `file` is required",
        )
    })
}

async fn store(
    services: &AppServices,
    category: BlobCategory,
    file: &UploadedFile,
) -> Result<BlobRef, axum::response::Response> {
    let blob = services
        .blobs
        .put(category, &file.original_filename, &file.bytes)
        .await
        .map_err(errors::blob_error_to_response)?;

    tracing::info!(
        category = %category,
        filename = %blob.filename,
        size = file.bytes.len(),
        "upload stored"
    );
    Ok(blob)
}

pub async fn upload_photo(
    Extension(services): Extension<Arc<AppServices>>,
    multipart: Multipart,
) -> axum::response::Response {
    let mut form = match read_form(multipart).await {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let file = match require_file(&mut form) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let Some(room_reference) = form.room_reference.take() else {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "multipart field `room_reference` is required",
        );
    };

    let blob = match store(&services, BlobCategory::Photos, &file).await {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    Json(serde_json::json!({
        "file_path": blob.path(),
        "room_reference": room_reference,
        "timestamp": Utc::now(),
        "description": form.description.unwrap_or_default(),
        "original_filename": file.original_filename,
    }))
    .into_response()
}

pub async fn upload_document(
    Extension(services): Extension<Arc<AppServices>>,
    multipart: Multipart,
) -> axum::response::Response {
    let mut form = match read_form(multipart).await {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let file = match require_file(&mut form) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let blob = match store(&services, BlobCategory::Documents, &file).await {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    Json(serde_json::json!({
        "file_path": blob.path(),
        "original_filename": file.original_filename,
        "uploaded_at": Utc::now(),
    }))
    .into_response()
}

pub async fn upload_property_photo(
    Extension(services): Extension<Arc<AppServices>>,
    multipart: Multipart,
) -> axum::response::Response {
    let mut form = match read_form(multipart).await {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let file = match require_file(&mut form) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let blob = match store(&services, BlobCategory::PropertyPhotos, &file).await {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    Json(serde_json::json!({
        "file_path": blob.path(),
        "original_filename": file.original_filename,
    }))
    .into_response()
}

pub async fn get_upload(
    Extension(services): Extension<Arc<AppServices>>,
    Path((category, filename)): Path<(String, String)>,
) -> axum::response::Response {
    let not_found =
        || errors::json_error(StatusCode::NOT_FOUND, "not_found", "file not found");

    let Ok(category) = category.parse::<BlobCategory>() else {
        return not_found();
    };

    match services.blobs.get(category, &filename).await {
        Ok(Some(bytes)) => (
            [(header::CONTENT_TYPE, dto::content_type_for(&filename))],
            bytes,
        )
            .into_response(),
        Ok(None) => not_found(),
        Err(e) => errors::blob_error_to_response(e),
    }
}
