//! Author management: listing plus promote/demote by email.
//!
//! There is no author create or edit endpoint; authors come into existence
//! by promoting an existing user, so that is all this page offers.

use tracing::debug;

use crate::api::{ApiClient, ApiError};
use crate::auth::{guard, RouteDecision, Session};
use crate::models::Author;

use super::{authed_client, Mounted};

pub struct AuthorsPage {
    api: ApiClient,
    authors: Vec<Author>,
    can_manage: bool,
}

impl AuthorsPage {
    /// Guard, then fetch the author list once. Promote/demote controls are
    /// admin-only; non-admins can still see the list if routed here, and the
    /// backend rejects their mutations regardless.
    pub async fn mount(session: &Session, api: &ApiClient) -> Result<Mounted<Self>, ApiError> {
        if guard::check(session) == RouteDecision::RedirectToLogin {
            return Ok(Mounted::RedirectToLogin);
        }

        let can_manage = guard::can_manage_authors(session.current_role());
        let api = authed_client(api, session);
        let authors = api.fetch_authors().await?;
        debug!(count = authors.len(), can_manage, "Authors page mounted");
        Ok(Mounted::Ready(Self {
            api,
            authors,
            can_manage,
        }))
    }

    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    /// Whether the promote/demote controls should be presented.
    pub fn can_manage(&self) -> bool {
        self.can_manage
    }

    pub async fn promote(&mut self, email: &str) -> Result<(), ApiError> {
        self.api.promote_author(email).await?;
        self.refetch().await
    }

    pub async fn demote(&mut self, email: &str) -> Result<(), ApiError> {
        self.api.demote_author(email).await?;
        self.refetch().await
    }

    async fn refetch(&mut self) -> Result<(), ApiError> {
        self.authors = self.api.fetch_authors().await?;
        Ok(())
    }
}
