use crate::api::APIError;
use crate::{models::*, telemetry::TraceMessageExt};
use actix_web::{get, web};
use tracing_batteries::prelude::*;

#[tracing::instrument(err, skip(state), fields(otel.kind = "internal"))]
#[get("/api/v1/health")]
pub async fn get_health_v1(state: web::Data<GlobalState>) -> Result<HealthV1, APIError> {
    state
        .store
        .send(GetHealth.trace())
        .await?
        .map(|health| health.into())
}
