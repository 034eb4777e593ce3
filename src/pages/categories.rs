//! Category listing and CRUD.

use tracing::debug;

use crate::api::{ApiClient, ApiError};
use crate::auth::{guard, RouteDecision, Session};
use crate::models::Category;

use super::{authed_client, Mounted};

pub struct CategoriesPage {
    api: ApiClient,
    categories: Vec<Category>,
}

impl CategoriesPage {
    pub async fn mount(session: &Session, api: &ApiClient) -> Result<Mounted<Self>, ApiError> {
        if guard::check(session) == RouteDecision::RedirectToLogin {
            return Ok(Mounted::RedirectToLogin);
        }

        let api = authed_client(api, session);
        let categories = api.fetch_categories().await?;
        debug!(count = categories.len(), "Categories page mounted");
        Ok(Mounted::Ready(Self { api, categories }))
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Create a category and refetch. Name emptiness is checked here so the
    /// backend never sees a blank submission.
    pub async fn create(&mut self, name: &str) -> Result<(), ApiError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ApiError::Validation("Category name is required".to_string()));
        }
        self.api.create_category(name).await?;
        self.refetch().await
    }

    pub async fn rename(&mut self, id: &str, name: &str) -> Result<(), ApiError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ApiError::Validation("Category name is required".to_string()));
        }
        self.api.update_category(id, name).await?;
        self.refetch().await
    }

    pub async fn remove(&mut self, id: &str) -> Result<(), ApiError> {
        self.api.delete_category(id).await?;
        self.refetch().await
    }

    async fn refetch(&mut self) -> Result<(), ApiError> {
        self.categories = self.api.fetch_categories().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[tokio::test]
    async fn test_unauthenticated_mount_redirects_without_network() {
        let config = Config::with("http://127.0.0.1:9", std::env::temp_dir());
        let api = ApiClient::new(&config).unwrap();
        let session = Session::new(std::env::temp_dir().join("inkdesk-categories-none"));

        let mounted = CategoriesPage::mount(&session, &api).await.unwrap();
        assert!(mounted.is_redirect());
    }
}
