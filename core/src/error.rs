//! Error types for the todo API client.
//!
//! # Design
//! `NotFound` and `BadRequest` get dedicated variants because the server
//! assigns them meaning (missing id, failed validation). Every other non-2xx
//! response lands in `Http` with the raw status and body. `Transport` is
//! produced by hosts when the round-trip itself fails.

use thiserror::Error;

/// Errors returned by `TodoClient` parse methods and `Transport` hosts.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404; the todo does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The server returned 400 with its validation message.
    #[error("{0}")]
    BadRequest(String),

    /// Any other unexpected status.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The request never produced a response.
    #[error("network error: {0}")]
    Transport(String),

    #[error("deserialization failed: {0}")]
    Deserialization(String),

    #[error("serialization failed: {0}")]
    Serialization(String),
}
