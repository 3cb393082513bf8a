use actix_web::web;

mod get_post;
mod get_posts;
mod store_post;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(get_posts::get_posts_v1)
        .service(get_post::get_post_v1)
        .service(store_post::store_post_v1);
}
