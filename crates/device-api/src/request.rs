//! Inbound Requests

use axum::http::HeaderMap;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

use crate::error::{InputError, ResourceError};
use crate::resource::Resource;
use crate::response::Response;

/// Context the host router hands to every resource call
#[derive(Debug, Clone, Default)]
pub struct Request {
    /// Query string parameters
    pub query: HashMap<String, String>,
    /// Request headers
    pub headers: HeaderMap,
}

impl Request {
    pub fn new(query: HashMap<String, String>, headers: HeaderMap) -> Self {
        Self { query, headers }
    }
}

/// CRUD operation kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::List => "list",
            Operation::Get => "get",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// Generic CRUD request as produced by a router
#[derive(Debug, Clone)]
pub struct CrudRequest {
    pub operation: Operation,
    pub id: Option<String>,
    pub payload: Option<Value>,
    pub context: Request,
}

impl CrudRequest {
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            id: None,
            payload: None,
            context: Request::default(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn with_context(mut self, context: Request) -> Self {
        self.context = context;
        self
    }

    fn require_id(&mut self) -> Result<String, ResourceError> {
        self.id
            .take()
            .ok_or_else(|| ResourceError::invalid_input(InputError::MissingId(self.operation)))
    }

    fn require_payload(&mut self) -> Result<Value, ResourceError> {
        self.payload
            .take()
            .ok_or_else(|| ResourceError::invalid_input(InputError::MissingPayload(self.operation)))
    }
}

/// Route a generic request to the matching resource method
///
/// For updates the request id, when present, replaces any id in the payload.
pub fn dispatch<R>(resource: &R, mut request: CrudRequest) -> Result<Response, ResourceError>
where
    R: Resource + ?Sized,
{
    match request.operation {
        Operation::List => resource.list(&request.context),
        Operation::Get => {
            let id = request.require_id()?;
            resource.get(&id, &request.context)
        }
        Operation::Create => {
            let candidate = request.require_payload()?;
            resource.create(candidate, &request.context)
        }
        Operation::Update => {
            let mut candidate = request.require_payload()?;
            if let (Some(id), Value::Object(fields)) = (request.id.take(), &mut candidate) {
                fields.insert("id".to_string(), Value::String(id));
            }
            resource.update(candidate, &request.context)
        }
        Operation::Delete => {
            let id = request.require_id()?;
            resource.delete(&id, &request.context)
        }
    }
}
