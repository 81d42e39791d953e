//! Error types for the employee API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because views distinguish "the record
//! does not exist" from "the server returned an unexpected status." Transport
//! failures are kept apart from HTTP statuses so a caller can tell an
//! unreachable service from a rejecting one. All other non-2xx responses land
//! in `HttpError` with the raw status code and body for debugging.

use thiserror::Error;

/// Errors returned by `EmployeeClient` parse methods and by transports.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a status other than the expected one or 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The request never produced a response (connect, DNS, I/O).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}
