use crate::identity::ResourceKind;
use actix_web::http::StatusCode;

#[derive(Debug, Serialize, Deserialize)]
pub struct RouteV1 {
    pub kind: ResourceKind,
    pub identifier: String,
    pub path: String,
    pub url: String,
    pub context: String,
}

json_responder!(RouteV1);

#[derive(Debug, Serialize, Deserialize)]
pub struct AssetV1 {
    pub url: String,
    pub context: String,
}

json_responder!(AssetV1);

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadV1 {
    pub path: String,
    pub url: String,
}

json_responder!(UploadV1 => StatusCode::CREATED);
