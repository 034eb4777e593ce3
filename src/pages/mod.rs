//! Page controllers behind the login gate.
//!
//! Every protected page follows the same lifecycle: the route guard runs
//! before construction, and only a `Proceed` decision reaches the network.
//! A mounted page fetches its data exactly once; later mutations refetch
//! through the page's own methods rather than remounting. Rendering is the
//! shell's job - these controllers own state and API traffic only.

pub mod authors;
pub mod categories;
pub mod editor;
pub mod posts;

pub use authors::AuthorsPage;
pub use categories::CategoriesPage;
pub use editor::EditorPage;
pub use posts::PostsPage;

use crate::api::ApiClient;
use crate::auth::Session;

/// Result of attempting to mount a protected page.
#[derive(Debug)]
pub enum Mounted<P> {
    Ready(P),
    RedirectToLogin,
}

impl<P> Mounted<P> {
    pub fn ready(self) -> Option<P> {
        match self {
            Mounted::Ready(page) => Some(page),
            Mounted::RedirectToLogin => None,
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, Mounted::RedirectToLogin)
    }
}

/// Clone the client with the session's bearer token stamped on, so every
/// request a page makes is authenticated as the logged-in user.
fn authed_client(api: &ApiClient, session: &Session) -> ApiClient {
    match session.token() {
        Some(token) => api.with_token(token),
        None => api.clone(),
    }
}
