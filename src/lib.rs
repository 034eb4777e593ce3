//! Inkdesk - a headless admin client for the Inkdesk blog platform API.
//!
//! This crate is the core a UI shell (terminal or graphical) drives to manage
//! blog content behind a login gate. It owns the authenticated session and
//! its persistence across restarts, gates page controllers on authentication
//! state, wraps the author/category/post endpoints in a typed client, and
//! performs the two-step presigned upload of post images directly to object
//! storage. Rendering and routing are the shell's concern, not this crate's.

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod pages;
pub mod upload;

pub use api::{ApiClient, ApiError};
pub use auth::{guard, Session};
pub use config::Config;
pub use upload::UploadCoordinator;
