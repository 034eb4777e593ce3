//! The post editor: compose a new post or rework an existing one.
//!
//! Editing an existing post is gated twice: the route guard for
//! authentication, then an ownership check - only an admin or one of the
//! post's listed authors may proceed. Image uploads go through the presigned
//! pipeline and only a committed public URL ever lands in the draft.

use tracing::{debug, warn};

use crate::api::{ApiClient, ApiError};
use crate::auth::{guard, RouteDecision, Session};
use crate::models::{Category, PostDraft};
use crate::upload::{SelectedFile, UploadCoordinator, UploadMode, UploadReport};

use super::{authed_client, Mounted};

pub struct EditorPage {
    api: ApiClient,
    mode: UploadMode,
    /// Slug of the post under edit; `None` while composing a new one.
    slug: Option<String>,
    pub draft: PostDraft,
    categories: Vec<Category>,
}

impl EditorPage {
    /// Mount the editor over an empty draft for a brand-new post.
    pub async fn mount_new(session: &Session, api: &ApiClient) -> Result<Mounted<Self>, ApiError> {
        if guard::check(session) == RouteDecision::RedirectToLogin {
            return Ok(Mounted::RedirectToLogin);
        }

        let api = authed_client(api, session);
        let categories = api.fetch_categories().await?;
        debug!("Editor mounted for a new post");
        Ok(Mounted::Ready(Self {
            api,
            mode: UploadMode::Create,
            slug: None,
            draft: PostDraft::default(),
            categories,
        }))
    }

    /// Mount the editor over an existing post. The post and the category list
    /// are each fetched once; a user who is neither an admin nor one of the
    /// post's authors is rejected before any draft state exists.
    pub async fn mount_edit(
        session: &Session,
        api: &ApiClient,
        id_or_slug: &str,
    ) -> Result<Mounted<Self>, ApiError> {
        if guard::check(session) == RouteDecision::RedirectToLogin {
            return Ok(Mounted::RedirectToLogin);
        }

        let api = authed_client(api, session);
        let post = api.fetch_post(id_or_slug).await?;

        let permitted = session.current_user().is_some_and(|user| {
            user.role.is_admin() || post.has_author(&user.id)
        });
        if !permitted {
            warn!(slug = %post.slug, "Edit rejected for non-author");
            return Err(ApiError::Rejected(
                "You do not have permission to edit this post".to_string(),
            ));
        }

        let categories = api.fetch_categories().await?;
        debug!(slug = %post.slug, "Editor mounted over existing post");
        Ok(Mounted::Ready(Self {
            api,
            mode: UploadMode::Edit {
                blog_id: post.id.clone(),
            },
            slug: Some(post.slug.clone()),
            draft: PostDraft::from_post(&post),
            categories,
        }))
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn is_editing(&self) -> bool {
        self.slug.is_some()
    }

    /// Run the presigned pipeline for whichever images were selected and
    /// commit the resulting public URLs into the draft. A failed target
    /// leaves its draft field untouched; the report carries the per-target
    /// outcome for the shell to surface.
    pub async fn upload_images(
        &mut self,
        thumbnail: Option<&SelectedFile>,
        cover: Option<&SelectedFile>,
    ) -> UploadReport {
        let coordinator = UploadCoordinator::new(self.api.clone());
        let report = coordinator.upload_both(&self.mode, thumbnail, cover).await;

        if let Some(url) = report.thumbnail.as_ref().and_then(|o| o.public_url()) {
            self.draft.thumbnail_image = url.to_string();
        }
        if let Some(url) = report.cover.as_ref().and_then(|o| o.public_url()) {
            self.draft.cover_image = url.to_string();
        }

        report
    }

    /// Validate, then create or update depending on how the editor was
    /// mounted. Validation failures never reach the network.
    pub async fn save(&self) -> Result<(), ApiError> {
        validate_draft(&self.draft)?;
        match &self.slug {
            Some(slug) => self.api.update_post(slug, &self.draft).await,
            None => self.api.create_post(&self.draft).await,
        }
    }
}

/// A draft must carry a title, description and content to be submittable;
/// whitespace-only values count as empty.
fn validate_draft(draft: &PostDraft) -> Result<(), ApiError> {
    if draft.title.trim().is_empty() {
        return Err(ApiError::Validation("Title is required".to_string()));
    }
    if draft.description.trim().is_empty() {
        return Err(ApiError::Validation("Description is required".to_string()));
    }
    if draft.content.trim().is_empty() {
        return Err(ApiError::Validation("Content is required".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn complete_draft() -> PostDraft {
        PostDraft {
            title: "A Post".to_string(),
            description: "About things".to_string(),
            content: "<p>Body</p>".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_unauthenticated_mount_redirects_without_network() {
        let config = Config::with("http://127.0.0.1:9", std::env::temp_dir());
        let api = ApiClient::new(&config).unwrap();
        let session = Session::new(std::env::temp_dir().join("inkdesk-editor-none"));

        let mounted = EditorPage::mount_new(&session, &api).await.unwrap();
        assert!(mounted.is_redirect());

        let mounted = EditorPage::mount_edit(&session, &api, "some-slug").await.unwrap();
        assert!(mounted.is_redirect());
    }

    #[test]
    fn test_validate_accepts_complete_draft() {
        assert!(validate_draft(&complete_draft()).is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_fields() {
        let mut draft = complete_draft();
        draft.title = "   ".to_string();
        match validate_draft(&draft) {
            Err(ApiError::Validation(msg)) => assert_eq!(msg, "Title is required"),
            other => panic!("expected Validation, got {:?}", other.err()),
        }

        let mut draft = complete_draft();
        draft.description.clear();
        assert!(validate_draft(&draft).is_err());

        let mut draft = complete_draft();
        draft.content.clear();
        assert!(validate_draft(&draft).is_err());
    }
}
