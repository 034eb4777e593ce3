//! API client for communicating with the blog platform REST API.
//!
//! This module provides the `ApiClient` struct for the login endpoint, the
//! author/category/post management endpoints, presigned-credential issuance,
//! and the direct object-storage write that consumes a credential.

use std::time::Duration;

use reqwest::{header, Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Config;
use crate::models::{Author, Category, Post, PostDraft, User};
use crate::upload::{ImageTypeParam, UploadGrants, UploadMode};

use super::envelope::Envelope;
use super::ApiError;

/// HTTP request timeout in seconds.
/// 30s allows for slow API responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Payload of a successful login: the identity and its bearer credential,
/// always issued together.
#[derive(Debug, Deserialize)]
pub struct LoginData {
    pub user: User,
    pub token: String,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct EmailRequest<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct NameRequest<'a> {
    name: &'a str,
}

/// API client for the blog platform.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new API client against the configured base URL.
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Set the bearer token for authenticated requests.
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Drop the bearer token, e.g. after logout.
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// Create a new ApiClient with the given token, sharing the connection pool.
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            token: Some(token.into()),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self.client.request(method, self.url(path));
        if let Some(ref token) = self.token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Read a response body as the shared envelope. Backend failures arrive
    /// both as 2xx `success:false` bodies and as error statuses carrying the
    /// same envelope shape, so the body is always read first.
    async fn read_envelope<T: DeserializeOwned>(response: Response) -> Result<Envelope<T>, ApiError> {
        let status = response.status();
        let body = response.text().await?;
        Self::parse_envelope(status, &body)
    }

    /// A 401 whose body carries a backend message (wrong credentials, say)
    /// surfaces that message through the usual envelope path; only a
    /// message-less 401 maps to the generic unauthorized error.
    fn parse_envelope<T: DeserializeOwned>(
        status: StatusCode,
        body: &str,
    ) -> Result<Envelope<T>, ApiError> {
        match serde_json::from_str::<Envelope<T>>(body) {
            Ok(envelope) if status == StatusCode::UNAUTHORIZED && !envelope.has_message() => {
                Err(ApiError::Unauthorized)
            }
            Ok(envelope) => Ok(envelope),
            Err(_) if status == StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized),
            Err(e) => {
                warn!(%status, error = %e, "Response body is not a valid envelope");
                Err(ApiError::InvalidResponse(format!("status {}: {}", status, e)))
            }
        }
    }

    async fn get_data<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        debug!(path, "GET");
        let response = self.request(Method::GET, path).send().await?;
        Self::read_envelope(response).await?.into_result()
    }

    async fn post_ack<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        debug!(path, "POST");
        let response = self.request(Method::POST, path).json(body).send().await?;
        Self::read_envelope::<serde_json::Value>(response).await?.into_ack()
    }

    async fn put_ack<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        debug!(path, "PUT");
        let response = self.request(Method::PUT, path).json(body).send().await?;
        Self::read_envelope::<serde_json::Value>(response).await?.into_ack()
    }

    async fn delete_ack(&self, path: &str) -> Result<(), ApiError> {
        debug!(path, "DELETE");
        let response = self.request(Method::DELETE, path).send().await?;
        Self::read_envelope::<serde_json::Value>(response).await?.into_ack()
    }

    // ===== Authentication =====

    /// Exchange credentials for an identity and bearer token. The caller
    /// (login form) validates non-emptiness before invoking this.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginData, ApiError> {
        debug!(email, "Logging in");
        let response = self
            .request(Method::POST, "/auth/login")
            .json(&LoginRequest { email, password })
            .send()
            .await?;
        Self::read_envelope(response).await?.into_result()
    }

    // ===== Authors =====

    pub async fn fetch_authors(&self) -> Result<Vec<Author>, ApiError> {
        self.get_data("/authors").await
    }

    /// Promote an existing user to author by email.
    pub async fn promote_author(&self, email: &str) -> Result<(), ApiError> {
        self.post_ack("/authors/promote", &EmailRequest { email }).await
    }

    /// Demote an author back to a plain user by email.
    pub async fn demote_author(&self, email: &str) -> Result<(), ApiError> {
        self.post_ack("/authors/demote", &EmailRequest { email }).await
    }

    // ===== Categories =====

    pub async fn fetch_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.get_data("/categories").await
    }

    pub async fn create_category(&self, name: &str) -> Result<(), ApiError> {
        self.post_ack("/categories", &NameRequest { name }).await
    }

    pub async fn update_category(&self, id: &str, name: &str) -> Result<(), ApiError> {
        self.put_ack(&format!("/categories/{}", id), &NameRequest { name }).await
    }

    pub async fn delete_category(&self, id: &str) -> Result<(), ApiError> {
        self.delete_ack(&format!("/categories/{}", id)).await
    }

    // ===== Posts =====

    pub async fn fetch_posts(&self) -> Result<Vec<Post>, ApiError> {
        self.get_data("/posts").await
    }

    pub async fn fetch_post(&self, id_or_slug: &str) -> Result<Post, ApiError> {
        self.get_data(&format!("/posts/{}", id_or_slug)).await
    }

    pub async fn create_post(&self, draft: &PostDraft) -> Result<(), ApiError> {
        self.post_ack("/posts", draft).await
    }

    pub async fn update_post(&self, slug: &str, draft: &PostDraft) -> Result<(), ApiError> {
        self.put_ack(&format!("/posts/{}", slug), draft).await
    }

    pub async fn delete_post(&self, slug: &str) -> Result<(), ApiError> {
        self.delete_ack(&format!("/posts/{}", slug)).await
    }

    // ===== Uploads =====

    /// Request single-use write credentials for one or both image slots.
    pub async fn request_upload_credentials(
        &self,
        mode: &UploadMode,
        image_type: ImageTypeParam,
    ) -> Result<UploadGrants, ApiError> {
        let path = presigned_path(mode, image_type);
        self.get_data(&path).await
    }

    /// Transfer raw file bytes directly to the storage endpoint named by a
    /// presigned credential. Deliberately bypasses `request()`: the write URL
    /// is absolute and must not carry our Authorization header. Success is
    /// any 2xx status; the provider's error body is ignored.
    pub async fn put_object(
        &self,
        write_url: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), ApiError> {
        debug!(url = write_url, len = bytes.len(), "Uploading object");
        let response = self
            .client
            .put(write_url)
            .header(header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            warn!(status = %response.status(), "Storage endpoint rejected upload");
            Err(ApiError::UploadFailed)
        }
    }
}

/// Build the presigned-credential query path. `blogId` only accompanies edit
/// mode; create mode has no content item yet.
fn presigned_path(mode: &UploadMode, image_type: ImageTypeParam) -> String {
    let mut path = format!("/presigned-url?mode={}", mode.as_query());
    if let UploadMode::Edit { blog_id } = mode {
        path.push_str("&blogId=");
        path.push_str(blog_id);
    }
    path.push_str("&imageType=");
    path.push_str(image_type.as_query());
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    #[test]
    fn test_presigned_path_create() {
        assert_eq!(
            presigned_path(&UploadMode::Create, ImageTypeParam::ThumbnailImage),
            "/presigned-url?mode=create&imageType=thumbnailImage"
        );
    }

    #[test]
    fn test_presigned_path_edit_both() {
        let mode = UploadMode::Edit { blog_id: "p42".to_string() };
        assert_eq!(
            presigned_path(&mode, ImageTypeParam::Both),
            "/presigned-url?mode=edit&blogId=p42&imageType=both"
        );
    }

    #[test]
    fn test_login_envelope_parses() {
        let json = r#"{
            "success": true,
            "data": {
                "user": {"_id": "u1", "username": "admin", "email": "a@b.c", "role": "admin"},
                "token": "abc"
            }
        }"#;
        let envelope: Envelope<LoginData> = serde_json::from_str(json).unwrap();
        let login = envelope.into_result().unwrap();
        assert_eq!(login.token, "abc");
        assert_eq!(login.user.role, Role::Admin);
    }

    #[test]
    fn test_login_failure_surfaces_message() {
        let json = r#"{"success": false, "message": "Invalid credentials"}"#;
        let envelope: Envelope<LoginData> = serde_json::from_str(json).unwrap();
        match envelope.into_result() {
            Err(ApiError::Rejected(msg)) => assert_eq!(msg, "Invalid credentials"),
            other => panic!("expected Rejected, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_unauthorized_with_message_surfaces_it() {
        // Wrong credentials arrive as a 401 carrying the usual envelope;
        // the backend's text must win over the generic unauthorized error.
        let body = r#"{"success": false, "error": {"message": "Invalid credentials"}}"#;
        let result = ApiClient::parse_envelope::<LoginData>(StatusCode::UNAUTHORIZED, body)
            .and_then(Envelope::into_result);
        match result {
            Err(ApiError::Rejected(msg)) => assert_eq!(msg, "Invalid credentials"),
            other => panic!("expected Rejected, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_message_less_unauthorized_stays_generic() {
        let result = ApiClient::parse_envelope::<LoginData>(StatusCode::UNAUTHORIZED, "");
        assert!(matches!(result, Err(ApiError::Unauthorized)));

        let body = r#"{"success": false}"#;
        let result = ApiClient::parse_envelope::<LoginData>(StatusCode::UNAUTHORIZED, body);
        assert!(matches!(result, Err(ApiError::Unauthorized)));
    }
}
