#[macro_use]
mod macros;

mod context;
mod error;
mod health;
mod posts;
mod resolve;
mod uploads;

#[cfg(test)]
pub mod test;

use actix_web::web;

pub use context::request_context;
pub use error::APIError;

pub fn configure(cfg: &mut web::ServiceConfig) {
    health::configure(cfg);
    posts::configure(cfg);
    resolve::configure(cfg);
    uploads::configure(cfg);
}
