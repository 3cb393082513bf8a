use crate::api::{APIError, request_context};
use crate::identity::resolve_asset;
use crate::models::*;
use actix_web::{HttpRequest, get, web};
use tracing_batteries::prelude::*;

#[derive(Debug, Deserialize)]
pub struct AssetQuery {
    #[serde(default)]
    path: String,
}

#[tracing::instrument(err, skip(state), fields(otel.kind = "internal"))]
#[get("/api/v1/asset")]
pub async fn get_asset_v1(
    req: HttpRequest,
    query: web::Query<AssetQuery>,
    state: web::Data<GlobalState>,
) -> Result<AssetV1, APIError> {
    let context = request_context(&req, &state);

    Ok(AssetV1 {
        url: resolve_asset(&query.path, &context),
        context: context.name().to_string(),
    })
}
