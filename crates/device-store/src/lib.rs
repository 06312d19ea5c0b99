//! Device Store
//!
//! Owns the device collection. Ids are allocated here and nowhere else.

mod device;
mod store;

pub use device::Device;
pub use store::Store;

use thiserror::Error;

/// Store errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No device is stored under the given id
    #[error("Device for id {id} not found")]
    NotFound { id: String },
}
