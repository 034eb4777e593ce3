//! Authentication module: the session and the route guard.
//!
//! This module provides:
//! - `Session`: the single source of truth for "who is logged in", persisted
//!   across restarts as one `{user, token}` record
//! - `guard`: the pre-mount check every protected page funnels through,
//!   plus the role-based visibility helpers
//!
//! The session is owned by one process-wide holder and mutated only through
//! `login`/`logout`/`restore`; pages read it but never mutate it directly.

pub mod guard;
pub mod session;

pub use guard::{NavItem, RouteDecision};
pub use session::{Session, SessionData};
