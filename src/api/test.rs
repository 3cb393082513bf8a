use crate::api::configure;
use crate::identity::UploadPolicy;
use crate::models::*;
use actix_web::{
    App,
    test::{self, read_body_json},
};
use serde::de::DeserializeOwned;

pub fn test_log_init() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();
}

pub async fn get_test_app(
    state: GlobalState,
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = actix_web::dev::ServiceResponse,
    Error = actix_web::Error,
> {
    test::init_service(
        App::new()
            .app_data(actix_web::web::Data::new(state.clone()))
            .configure(configure),
    )
    .await
}

/// A fresh in-memory state whose uploads are written beneath `root`.
pub fn get_upload_state<P: AsRef<std::path::Path>>(root: P, max_size: usize) -> GlobalState {
    GlobalState::new(":memory:")
        .expect("an in-memory store")
        .with_uploads(UploadPolicy::new(root).with_max_size(max_size))
}

/// Sends a raw upload body, as a browser form would, from the given page host.
pub async fn send_upload(
    state: &GlobalState,
    path: &str,
    content_type: &str,
    body: &'static [u8],
    host: &str,
) -> actix_web::dev::ServiceResponse {
    let app = get_test_app(state.clone()).await;
    let req = test::TestRequest::post()
        .uri(path)
        .insert_header(("Content-Type", content_type))
        .insert_header(("Host", host))
        .insert_header(("User-Agent", "Test"))
        .set_payload(body)
        .to_request();

    test::call_service(&app, req).await
}

pub async fn assert_status(
    resp: actix_web::dev::ServiceResponse,
    expected_status: http::StatusCode,
) -> actix_web::dev::ServiceResponse {
    if expected_status != resp.status() {
        let status = resp.status();
        if resp
            .headers()
            .get("content-type")
            .and_then(|h| h.to_str().ok())
            .map(|h| h.starts_with("application/json"))
            .unwrap_or_default()
        {
            let err: super::APIError = get_content(resp).await;
            panic!(
                "Unexpected response code\n  got: {}\n  expected: {}\n  error: {}",
                status, expected_status, err
            )
        } else {
            panic!(
                "Unexpected response code\n  got: {}\n  expected: {}\n  (the response carried no error body)",
                status, expected_status
            )
        }
    } else {
        resp
    }
}

pub async fn get_content<T: DeserializeOwned>(resp: actix_web::dev::ServiceResponse) -> T {
    read_body_json(resp).await
}
