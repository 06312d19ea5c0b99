//! Device Resource
//!
//! Translates CRUD calls into store operations and store outcomes into
//! response envelopes. Never retries and never reaches past the store API.

use device_store::{Device, Store};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::{InputError, ResourceError};
use crate::request::Request;
use crate::response::{Payload, Response};

/// CRUD contract a router drives
pub trait Resource: Send + Sync {
    /// All records
    fn list(&self, request: &Request) -> Result<Response, ResourceError>;

    /// One record by id
    fn get(&self, id: &str, request: &Request) -> Result<Response, ResourceError>;

    /// Store a new record built from `candidate`
    fn create(&self, candidate: Value, request: &Request) -> Result<Response, ResourceError>;

    /// Replace the record identified by `candidate`'s id
    fn update(&self, candidate: Value, request: &Request) -> Result<Response, ResourceError>;

    /// Remove a record by id
    fn delete(&self, id: &str, request: &Request) -> Result<Response, ResourceError>;
}

/// [`Resource`] backed by a shared [`Store`]
#[derive(Debug, Clone)]
pub struct DeviceResource {
    store: Arc<Store>,
}

impl DeviceResource {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Underlying store
    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    fn decode(candidate: Value) -> Result<Device, ResourceError> {
        if !candidate.is_object() {
            warn!("Rejected device payload: not an object");
            return Err(ResourceError::invalid_input(InputError::NotAnObject));
        }
        serde_json::from_value(candidate).map_err(|err| {
            warn!("Rejected device payload: {}", err);
            ResourceError::invalid_input(err)
        })
    }
}

/// Numeric ids sort by value; anything else after them, lexically
fn id_order(device: &Device) -> (u64, &str) {
    (device.id.parse().unwrap_or(u64::MAX), device.id.as_str())
}

impl Resource for DeviceResource {
    fn list(&self, _request: &Request) -> Result<Response, ResourceError> {
        let mut devices: Vec<Device> = self.store.get_all().into_values().collect();
        devices.sort_by(|a, b| id_order(a).cmp(&id_order(b)));

        Ok(Response::ok(Payload::Many(devices)))
    }

    fn get(&self, id: &str, _request: &Request) -> Result<Response, ResourceError> {
        let device = self.store.get_one(id).map_err(|err| {
            debug!("Lookup failed: {}", err);
            ResourceError::from(err)
        })?;

        Ok(Response::ok(Payload::One(device)))
    }

    fn create(&self, candidate: Value, _request: &Request) -> Result<Response, ResourceError> {
        let mut device = Self::decode(candidate)?;

        device.id = self.store.insert(device.clone());
        debug!("Created device {} ({})", device.id, device.name);

        Ok(Response::created(device))
    }

    fn update(&self, candidate: Value, _request: &Request) -> Result<Response, ResourceError> {
        let device = Self::decode(candidate)?;

        self.store.update(device.clone())?;

        Ok(Response::no_content(Payload::One(device)))
    }

    fn delete(&self, id: &str, _request: &Request) -> Result<Response, ResourceError> {
        self.store.delete(id)?;

        Ok(Response::no_content(Payload::None))
    }
}
