use crate::api::{APIError, request_context};
use crate::identity::{ResourceKind, canonical_identifier, route_path};
use crate::models::*;
use actix_web::{HttpRequest, get, web};
use tracing_batteries::prelude::*;

#[tracing::instrument(err, skip(state), fields(otel.kind = "internal"))]
#[get("/api/v1/route/{kind}/{identifier:.*}")]
pub async fn get_route_v1(
    req: HttpRequest,
    state: web::Data<GlobalState>,
) -> Result<RouteV1, APIError> {
    let kind = ResourceKind::from_route_prefix(req.match_info().query("kind")).ok_or_else(|| {
        APIError::new(
            404,
            "Not Found",
            "Routes can only be resolved for blogs, categories and tags.",
        )
    })?;

    let identifier = canonical_identifier(req.match_info().query("identifier"), kind);
    let path = route_path(identifier, kind);
    let context = request_context(&req, &state);

    Ok(RouteV1 {
        kind,
        identifier: identifier.to_string(),
        url: context.absolute_url(&path),
        path,
        context: context.name().to_string(),
    })
}
