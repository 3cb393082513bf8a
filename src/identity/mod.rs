//! Canonical identity for the resources this site serves.
//!
//! Slugs, categories, tags and uploaded image paths arrive from storage and
//! from route parameters in whatever shape they were written. Everything in
//! here reduces those values to one canonical form and combines that form
//! with the active [`ExecutionContext`] to produce a usable address.

mod assets;
mod environment;
mod normalize;
mod routes;
mod sanitize;

pub use assets::*;
pub use environment::*;
pub use normalize::*;
pub use routes::*;
pub use sanitize::*;
