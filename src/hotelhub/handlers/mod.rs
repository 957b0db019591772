pub mod health;
pub use self::health::health;

pub mod user_register;
pub use self::user_register::register;

pub mod user_login;
pub use self::user_login::login;

// common types for the handlers
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::debug;

/// Client-facing failures. Messages are short and never carry internal detail.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid input")]
    BadRequest,
    #[error("Invalid credentials")]
    Unauthorized,
    #[error("{0}")]
    Internal(&'static str),
}

impl ApiError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

/// Unwrap a JSON body, turning any rejection into a 400.
fn decode<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            debug!("Failed to decode request body: {}", rejection.body_text());
            Err(ApiError::BadRequest)
        }
    }
}
