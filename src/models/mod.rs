//! Data models for blog platform entities.
//!
//! This module contains the data structures used to represent
//! backend data including:
//!
//! - `User`, `Author`, `Role`: identities and their authorization tier
//! - `Category`: post categorization
//! - `Post`, `PostDraft`, `PostStatus`: content items and their edit payload

pub mod category;
pub mod post;
pub mod user;

pub use category::Category;
pub use post::{DocRef, EmbeddedRef, Post, PostDraft, PostStatus};
pub use user::{Author, Role, User};
