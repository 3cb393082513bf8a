use crate::api::APIError;
use crate::identity::{ResourceKind, canonical_identifier};
use crate::{models::*, telemetry::TraceMessageExt};
use actix_web::{HttpRequest, get, web};
use tracing_batteries::prelude::*;

#[tracing::instrument(err, skip(state), fields(otel.kind = "internal"))]
#[get("/api/v1/post/{slug:.*}")]
pub async fn get_post_v1(
    req: HttpRequest,
    state: web::Data<GlobalState>,
) -> Result<PostV1, APIError> {
    let slug = canonical_identifier(req.match_info().query("slug"), ResourceKind::Blog).to_string();
    state
        .store
        .send(GetPost { slug }.trace())
        .await?
        .map(|post| post.into())
}
