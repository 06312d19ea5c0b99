//! HTTP Routes

pub mod devices;
pub mod status;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response as HttpResponse},
    Json,
};
use serde::Serialize;
use tracing::error;

use crate::error::ResourceError;
use crate::response::{Response, Status};

#[derive(Debug, Serialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    status: u16,
    message: String,
}

impl IntoResponse for Response {
    fn into_response(self) -> HttpResponse {
        let status = StatusCode::from(self.status);
        match self.status {
            Status::NoContent => status.into_response(),
            _ => (status, Json(self.payload)).into_response(),
        }
    }
}

impl IntoResponse for ResourceError {
    fn into_response(self) -> HttpResponse {
        let status = match self.status() {
            Some(status) => StatusCode::from(status),
            None => {
                error!("Unhandled resource error: {}", self);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ErrorEnvelope {
            error: ErrorBody {
                status: status.as_u16(),
                message: self.message(),
            },
        };
        (status, Json(body)).into_response()
    }
}
