use crate::identity::UploadError;
use actix_http::body::BoxBody;
use actix_web::{HttpResponse, error, http::StatusCode};
use std::fmt;
use tracing_batteries::prelude::*;

#[derive(Debug, Serialize, Deserialize)]
pub struct APIError {
    pub code: u16,
    pub error: String,
    pub message: String,
}

impl APIError {
    pub fn new(code: u16, error: &str, message: &str) -> Self {
        Self {
            code,
            error: error.to_string(),
            message: message.to_string(),
        }
    }

    fn internal() -> Self {
        Self::new(
            500,
            "Internal Server Error",
            "We ran into a problem, this has been reported and will be looked at.",
        )
    }
}

impl error::ResponseError for APIError {
    fn error_response(&self) -> HttpResponse<BoxBody> {
        HttpResponse::build(self.status_code())
            .content_type("application/json; charset=utf-8")
            .json(self)
    }

    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl fmt::Display for APIError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[HTTP {} {}] {}", self.code, self.error, self.message)
    }
}

impl From<sqlite::Error> for APIError {
    fn from(err: sqlite::Error) -> Self {
        error!({ exception.message = %err }, "We were unable to query the SQLite database");

        sentry::capture_error(&err);

        Self::internal()
    }
}

impl From<serde_json::Error> for APIError {
    fn from(err: serde_json::Error) -> Self {
        error!({ exception.message = %err }, "A stored record could not be decoded");

        sentry::capture_error(&err);

        Self::internal()
    }
}

impl From<actix::MailboxError> for APIError {
    fn from(err: actix::MailboxError) -> Self {
        error!({ exception.message = %err }, "We were unable to reach the store actor");

        sentry::capture_error(&err);

        Self::internal()
    }
}

impl From<UploadError> for APIError {
    fn from(err: UploadError) -> Self {
        let message = err.to_string();
        match err {
            UploadError::InvalidFolder(_) | UploadError::Empty => {
                Self::new(400, "Bad Request", &message)
            }
            UploadError::UnsupportedType(_) => Self::new(415, "Unsupported Media Type", &message),
            UploadError::TooLarge { .. } => Self::new(413, "Payload Too Large", &message),
            UploadError::Io(err) => {
                error!({ exception.message = %err }, "We were unable to store an uploaded file");

                sentry::capture_error(&err);

                Self::internal()
            }
        }
    }
}
