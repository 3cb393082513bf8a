use actix_web::web;

mod get_asset;
mod get_route;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(get_route::get_route_v1)
        .service(get_asset::get_asset_v1);
}
