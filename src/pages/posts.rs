//! Post listing and deletion.

use tracing::debug;

use crate::api::{ApiClient, ApiError};
use crate::auth::{guard, RouteDecision, Session};
use crate::models::Post;

use super::{authed_client, Mounted};

/// The post list page: every post on the platform, newest ordering decided
/// by the backend.
pub struct PostsPage {
    api: ApiClient,
    posts: Vec<Post>,
}

impl PostsPage {
    /// Guard, then fetch the list once. An unauthenticated mount redirects
    /// without touching the network.
    pub async fn mount(session: &Session, api: &ApiClient) -> Result<Mounted<Self>, ApiError> {
        if guard::check(session) == RouteDecision::RedirectToLogin {
            return Ok(Mounted::RedirectToLogin);
        }

        let api = authed_client(api, session);
        let posts = api.fetch_posts().await?;
        debug!(count = posts.len(), "Posts page mounted");
        Ok(Mounted::Ready(Self { api, posts }))
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Delete a post by slug, then refetch so the list reflects the backend's
    /// view rather than a local guess.
    pub async fn delete(&mut self, slug: &str) -> Result<(), ApiError> {
        self.api.delete_post(slug).await?;
        self.posts = self.api.fetch_posts().await?;
        Ok(())
    }
}
