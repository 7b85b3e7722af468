use rocket::http::{ContentType, Status};
use rocket::request::Request;
use rocket::response::{self, Responder, Response};
use rocket::serde::json::Json;

use std::io;
use std::io::Cursor;

use thiserror::Error;
use tracing::error;

use crate::data::Message;

/// Every failure a handler can produce, mapped one-to-one onto an HTTP
/// status. Not-found and not-owned are deliberately the same variant so
/// responses never reveal whether a foreign resource exists.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Too many login attempts. Please try again later.")]
    TooManyRequests,

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn status(&self) -> Status {
        match self {
            ApiError::BadRequest(_) => Status::BadRequest,
            ApiError::Unauthorized(_) => Status::Unauthorized,
            ApiError::Forbidden(_) => Status::Forbidden,
            ApiError::NotFound(_) => Status::NotFound,
            ApiError::Conflict(_) => Status::Conflict,
            ApiError::TooManyRequests => Status::TooManyRequests,
            ApiError::Database(_) | ApiError::Io(_) | ApiError::Internal(_) => {
                Status::InternalServerError
            }
        }
    }

    /// Internal detail stays in the logs; clients get a generic message.
    fn public_message(&self) -> String {
        match self {
            ApiError::Database(_) | ApiError::Io(_) | ApiError::Internal(_) => {
                "Internal server error".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, _request: &'r Request<'_>) -> response::Result<'static> {
        let status = self.status();
        if status == Status::InternalServerError {
            error!("request failed: {}", self);
        }

        let body = serde_json::json!({ "message": self.public_message() }).to_string();
        Response::build()
            .status(status)
            .header(ContentType::JSON)
            .sized_body(body.len(), Cursor::new(body))
            .ok()
    }
}

#[catch(400)]
pub fn bad_request() -> Json<Message> {
    Json(Message::new("Invalid request"))
}

#[catch(401)]
pub fn unauthorized() -> Json<Message> {
    Json(Message::new("Invalid or expired token"))
}

#[catch(403)]
pub fn forbidden() -> Json<Message> {
    Json(Message::new("No token provided"))
}

#[catch(404)]
pub fn not_found() -> Json<Message> {
    Json(Message::new("Resource not found"))
}

// Body deserialization failures surface as 400, not Rocket's default 422.
#[catch(422)]
pub fn unprocessable() -> (Status, Json<Message>) {
    (Status::BadRequest, Json(Message::new("Invalid request body")))
}

#[catch(500)]
pub fn internal() -> Json<Message> {
    Json(Message::new("Internal server error"))
}
