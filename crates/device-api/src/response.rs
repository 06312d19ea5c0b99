//! Response Envelope

use axum::http::StatusCode;
use device_store::Device;
use serde::Serialize;

/// Status codes a resource can answer with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Created,
    NoContent,
    BadRequest,
    NotFound,
}

impl Status {
    /// Numeric HTTP code
    pub fn code(self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::Created => 201,
            Status::NoContent => 204,
            Status::BadRequest => 400,
            Status::NotFound => 404,
        }
    }
}

impl From<Status> for StatusCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Ok => StatusCode::OK,
            Status::Created => StatusCode::CREATED,
            Status::NoContent => StatusCode::NO_CONTENT,
            Status::BadRequest => StatusCode::BAD_REQUEST,
            Status::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

/// Response body
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    None,
    One(Device),
    Many(Vec<Device>),
}

/// Successful resource result
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: Status,
    pub payload: Payload,
}

impl Response {
    pub fn new(status: Status, payload: Payload) -> Self {
        Self { status, payload }
    }

    pub fn ok(payload: Payload) -> Self {
        Self::new(Status::Ok, payload)
    }

    pub fn created(device: Device) -> Self {
        Self::new(Status::Created, Payload::One(device))
    }

    pub fn no_content(payload: Payload) -> Self {
        Self::new(Status::NoContent, payload)
    }
}
