use crate::api::APIError;
use crate::identity::{ResourceKind, canonical_identifier};
use crate::{models::*, telemetry::TraceMessageExt};
use actix_web::{HttpRequest, put, web};
use tracing_batteries::prelude::*;

#[tracing::instrument(err, skip(state), fields(otel.kind = "internal"))]
#[put("/api/v1/post/{slug:.*}")]
pub async fn store_post_v1(
    req: HttpRequest,
    body: web::Json<PostInputV1>,
    state: web::Data<GlobalState>,
) -> Result<PostV1, APIError> {
    let slug = req.match_info().query("slug");
    if canonical_identifier(slug, ResourceKind::Blog).is_empty() {
        return Err(APIError::new(
            400,
            "Bad Request",
            "A post must have a slug which is not just a route prefix.",
        ));
    }

    if body.title.trim().is_empty() {
        return Err(APIError::new(400, "Bad Request", "A post must have a title."));
    }

    let post = Post::canonical(slug, body.into_inner());
    state
        .store
        .send(StorePost { post }.trace())
        .await?
        .map(|post| post.into())
}
