//! Trait abstractions for dependency injection and testability.
//!
//! - [`HttpClient`] - HTTP operations (GET, POST, streaming GET)

pub mod http;

pub use http::{ByteStream, Headers, HttpClient, HttpError, Response};
