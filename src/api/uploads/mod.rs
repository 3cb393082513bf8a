use actix_web::web;

mod add_upload;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(add_upload::add_upload_v1);
}
