//! Mock backend errors and their HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ServerError {
    #[error("not found")]
    NotFound,
    #[error("{0}")]
    Integrity(String),
    #[error("{0}")]
    BadRequest(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            ServerError::NotFound => {
                return (StatusCode::NOT_FOUND, self.to_string()).into_response();
            }
            ServerError::Integrity(_) => (StatusCode::BAD_REQUEST, "Data integrity violation"),
            ServerError::BadRequest(_) => (StatusCode::BAD_REQUEST, "Bad request"),
        };
        let body = serde_json::json!({
            "status": status.as_u16(),
            "error": error,
            "message": self.to_string(),
        });
        (status, Json(body)).into_response()
    }
}
