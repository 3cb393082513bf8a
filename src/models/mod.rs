#[macro_use]
mod macros;

mod health;
mod post;
mod resolve;

use crate::identity::{Environment, UploadPolicy};
use actix::prelude::*;

pub use health::*;
pub use post::*;
pub use resolve::*;

#[derive(Clone)]
pub struct GlobalState {
    pub store: Addr<crate::store::Store>,
    pub environment: Environment,
    pub uploads: UploadPolicy,
}

impl GlobalState {
    pub fn new<P: AsRef<str>>(database_path: P) -> Result<Self, sqlite::Error> {
        Ok(Self {
            store: crate::store::Store::new(database_path)?.start(),
            environment: Environment::default(),
            uploads: UploadPolicy::default(),
        })
    }

    pub fn with_environment(self, environment: Environment) -> Self {
        Self {
            environment,
            ..self
        }
    }

    pub fn with_uploads(self, uploads: UploadPolicy) -> Self {
        Self { uploads, ..self }
    }
}
