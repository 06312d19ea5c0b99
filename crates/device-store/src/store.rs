//! Store Implementation

use crate::{Device, StoreError};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info};

/// Map and id counter, always locked together
#[derive(Debug)]
struct Inner {
    devices: HashMap<String, Device>,
    next_id: u64,
}

/// In-memory device store
///
/// Every operation takes the same lock, so inserts never race on the id
/// counter and readers never see a half-applied write. Callers only ever get
/// clones of stored records.
#[derive(Debug)]
pub struct Store {
    inner: Mutex<Inner>,
}

impl Store {
    /// Create an empty store; the first id handed out is "1"
    pub fn new() -> Self {
        info!("Creating in-memory device store");
        Self {
            inner: Mutex::new(Inner {
                devices: HashMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Create a store pre-populated by inserting `devices` in order
    pub fn with_devices<I>(devices: I) -> Self
    where
        I: IntoIterator<Item = Device>,
    {
        let store = Self::new();
        for device in devices {
            store.insert(device);
        }
        store
    }

    // No operation can panic between touching the counter and the map, so a
    // poisoned lock still guards consistent state.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert a device under a freshly allocated id and return that id
    ///
    /// Any id already set on `device` is discarded.
    pub fn insert(&self, mut device: Device) -> String {
        let mut inner = self.lock();

        let id = inner.next_id.to_string();
        inner.next_id += 1;

        device.id = id.clone();
        inner.devices.insert(id.clone(), device);
        debug!("Inserted device with ID {}", id);

        id
    }

    /// Snapshot of every stored device keyed by id
    pub fn get_all(&self) -> HashMap<String, Device> {
        self.lock().devices.clone()
    }

    /// Get the device stored under `id`
    pub fn get_one(&self, id: &str) -> Result<Device, StoreError> {
        self.lock()
            .devices
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })
    }

    /// Replace the stored record with the same id as `device`
    pub fn update(&self, device: Device) -> Result<(), StoreError> {
        let mut inner = self.lock();

        match inner.devices.get_mut(&device.id) {
            Some(stored) => {
                debug!("Updated device with ID {}", device.id);
                *stored = device;
                Ok(())
            }
            None => Err(StoreError::NotFound { id: device.id }),
        }
    }

    /// Remove the device stored under `id`
    ///
    /// The id is retired; later inserts never reuse it.
    pub fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut inner = self.lock();

        if inner.devices.remove(id).is_none() {
            return Err(StoreError::NotFound { id: id.to_string() });
        }
        debug!("Deleted device with ID {}", id);

        Ok(())
    }

    /// Number of stored devices
    pub fn len(&self) -> usize {
        self.lock().devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
