//! Error types for the pet API client and the list synchronizer.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the record does not exist" from "the server returned an unexpected
//! status." All other non-2xx responses land in `HttpError` with the raw
//! status code and body for debugging.

use thiserror::Error;

/// Errors returned by `PetClient` and `StoreClient` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404; the requested pet does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The transport could not complete the round trip.
    #[error("transport failed: {0}")]
    Transport(String),

    /// An update was requested for a record that has no id.
    #[error("record has no id")]
    MissingId,
}

/// Errors returned by `Synchronizer` operations.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The record has not been created yet, so it cannot be looked up by id.
    #[error("record has no id")]
    MissingId,

    /// An update came back for an id the canonical collection does not hold.
    #[error("no record with id {0}")]
    UnknownRecord(i64),

    /// The store handed out an id that is already in the canonical collection.
    #[error("duplicate record id {0}")]
    DuplicateId(i64),
}
