//! Typed client for the blog platform REST API.
//!
//! Every endpoint shares one response envelope convention; `envelope`
//! normalizes it into a tagged result at the boundary so no caller ever
//! inspects a raw `success` flag. `client` holds the reqwest-backed
//! `ApiClient` and `error` the user-facing error taxonomy.

pub mod client;
pub mod envelope;
pub mod error;

pub use client::{ApiClient, LoginData};
pub use envelope::Envelope;
pub use error::ApiError;
