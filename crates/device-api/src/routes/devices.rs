//! Device Routes
//!
//! Thin HTTP binding: each handler turns the HTTP request into a
//! [`CrudRequest`] and hands it to [`dispatch`].

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::HeaderMap,
};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::ResourceError;
use crate::request::{dispatch, CrudRequest, Operation, Request};
use crate::resource::Resource;
use crate::response::Response;

type Params = Query<HashMap<String, String>>;

// Bodies are parsed here rather than with `Json` so bad input surfaces as the
// resource's own 400 instead of axum's rejection.
fn parse_body(body: &Bytes) -> Result<Value, ResourceError> {
    serde_json::from_slice(body).map_err(ResourceError::invalid_input)
}

fn crud(operation: Operation, query: HashMap<String, String>, headers: HeaderMap) -> CrudRequest {
    CrudRequest::new(operation).with_context(Request::new(query, headers))
}

/// GET /api/devices
pub async fn list<R: Resource>(
    State(resource): State<Arc<R>>,
    Query(query): Params,
    headers: HeaderMap,
) -> Result<Response, ResourceError> {
    dispatch(resource.as_ref(), crud(Operation::List, query, headers))
}

/// GET /api/devices/:id
pub async fn get_one<R: Resource>(
    State(resource): State<Arc<R>>,
    Path(id): Path<String>,
    Query(query): Params,
    headers: HeaderMap,
) -> Result<Response, ResourceError> {
    dispatch(resource.as_ref(), crud(Operation::Get, query, headers).with_id(id))
}

/// POST /api/devices
pub async fn create<R: Resource>(
    State(resource): State<Arc<R>>,
    Query(query): Params,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ResourceError> {
    let candidate = parse_body(&body)?;
    dispatch(
        resource.as_ref(),
        crud(Operation::Create, query, headers).with_payload(candidate),
    )
}

/// PATCH|PUT /api/devices/:id
pub async fn update<R: Resource>(
    State(resource): State<Arc<R>>,
    Path(id): Path<String>,
    Query(query): Params,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ResourceError> {
    let candidate = parse_body(&body)?;
    dispatch(
        resource.as_ref(),
        crud(Operation::Update, query, headers)
            .with_id(id)
            .with_payload(candidate),
    )
}

/// DELETE /api/devices/:id
pub async fn delete<R: Resource>(
    State(resource): State<Arc<R>>,
    Path(id): Path<String>,
    Query(query): Params,
    headers: HeaderMap,
) -> Result<Response, ResourceError> {
    dispatch(resource.as_ref(), crud(Operation::Delete, query, headers).with_id(id))
}
