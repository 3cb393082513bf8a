use crate::api::{APIError, request_context};
use crate::identity::{UploadError, extension_for, persist_upload, resolve_asset, valid_folder};
use crate::models::*;
use actix_web::{HttpRequest, http::header, post, web};
use futures::StreamExt;
use tracing_batteries::prelude::*;

#[tracing::instrument(err, skip(state, payload), fields(otel.kind = "internal"))]
#[post("/api/v1/upload/{folder}")]
pub async fn add_upload_v1(
    req: HttpRequest,
    mut payload: web::Payload,
    state: web::Data<GlobalState>,
) -> Result<UploadV1, APIError> {
    let folder = req.match_info().query("folder");
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    // Refuse early so that a disallowed body is never buffered.
    if !valid_folder(folder) {
        return Err(UploadError::InvalidFolder(folder.to_string()).into());
    }

    if extension_for(content_type).is_none() {
        return Err(UploadError::UnsupportedType(content_type.to_string()).into());
    }

    let mut content = web::BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|err| {
            warn!("Failed to read an upload from the client: {}", err);
            APIError::new(
                400,
                "Bad Request",
                "The uploaded file could not be read, please try again.",
            )
        })?;

        state.uploads.check_size(content.len() + chunk.len())?;
        content.extend_from_slice(&chunk);
    }

    let path = persist_upload(&state.uploads, folder, content_type, &content).await?;
    let context = request_context(&req, &state);

    Ok(UploadV1 {
        url: resolve_asset(&path, &context),
        path,
    })
}
