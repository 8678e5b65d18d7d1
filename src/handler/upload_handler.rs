use axum::extract::{Multipart, Path, State};
use axum::response::IntoResponse;
use axum::Json;
use std::sync::Arc;
use tracing::warn;

use crate::util::error::HandlerError;
use crate::util::image_store::ImageStoreService;

const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Accepts a single multipart `image` field and stores it.
pub async fn upload_image_handler(
    State(image_store): State<Option<Arc<ImageStoreService>>>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, HandlerError> {
    let image_store = image_store
        .ok_or_else(|| HandlerError::bad_request("Image uploads are not enabled"))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| HandlerError::bad_request(format!("Malformed multipart body: {}", e)))?
    {
        if field.name() != Some("image") {
            continue;
        }

        let filename = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().map(|ct| ct.to_string());
        if let Some(ref ct) = content_type {
            if !ct.starts_with("image/") {
                return Err(HandlerError::bad_request(format!("Unsupported content type '{}'", ct)));
            }
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| HandlerError::bad_request(format!("Failed to read upload: {}", e)))?;
        if data.is_empty() {
            return Err(HandlerError::bad_request("Uploaded file is empty"));
        }
        if data.len() > MAX_IMAGE_BYTES {
            return Err(HandlerError::bad_request("Uploaded file exceeds the 10 MB limit"));
        }

        let uploaded = image_store
            .upload_image(&filename, data.to_vec(), content_type.as_deref())
            .await
            .map_err(|e| HandlerError::internal(format!("Upload failed: {}", e)))?;
        return Ok(Json(uploaded));
    }

    Err(HandlerError::bad_request("Missing 'image' field"))
}

/// Best-effort delete: reports success even when the object is already gone.
pub async fn delete_image_handler(
    State(image_store): State<Option<Arc<ImageStoreService>>>,
    Path(public_id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let image_store = image_store
        .ok_or_else(|| HandlerError::bad_request("Image uploads are not enabled"))?;

    if let Err(e) = image_store.remove_image(&public_id).await {
        warn!(public_id = %public_id, "Image delete failed: {}", e);
    }
    Ok(Json(serde_json::json!({ "message": "Image deleted" })))
}
