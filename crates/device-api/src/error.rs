//! Resource Error Types

use device_store::StoreError;
use thiserror::Error;

use crate::request::Operation;
use crate::response::Status;

/// Errors returned by a [`Resource`](crate::Resource)
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The referenced device does not exist
    #[error("{message}")]
    NotFound {
        message: String,
        #[source]
        cause: StoreError,
    },

    /// The request payload could not be read as a device
    #[error("{message}")]
    InvalidInput {
        message: String,
        #[source]
        cause: InputError,
    },

    /// Anything else, passed through untouched
    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

/// Why a request payload was rejected
#[derive(Debug, Error)]
pub enum InputError {
    #[error("payload is not valid device JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("payload must be a JSON object")]
    NotAnObject,

    #[error("{0} request requires an id")]
    MissingId(Operation),

    #[error("{0} request requires a payload")]
    MissingPayload(Operation),
}

impl ResourceError {
    /// Wrap an input problem as a 400-equivalent
    pub fn invalid_input(cause: impl Into<InputError>) -> Self {
        ResourceError::InvalidInput {
            message: "Invalid instance given".to_string(),
            cause: cause.into(),
        }
    }

    /// Status to report, `None` for errors this layer does not classify
    pub fn status(&self) -> Option<Status> {
        match self {
            ResourceError::NotFound { .. } => Some(Status::NotFound),
            ResourceError::InvalidInput { .. } => Some(Status::BadRequest),
            ResourceError::Other(_) => None,
        }
    }

    /// User-visible message
    pub fn message(&self) -> String {
        match self {
            ResourceError::NotFound { message, .. } | ResourceError::InvalidInput { message, .. } => {
                message.clone()
            }
            ResourceError::Other(err) => err.to_string(),
        }
    }
}

impl From<StoreError> for ResourceError {
    fn from(err: StoreError) -> Self {
        ResourceError::NotFound {
            message: err.to_string(),
            cause: err,
        }
    }
}
