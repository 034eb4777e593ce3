use serde::{Deserialize, Serialize};

/// Publication state of a post. New drafts start private.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Private,
    Public,
}

/// A referenced document the backend returns either as a bare id string or
/// as an embedded object, depending on whether the endpoint populated it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocRef {
    Id(String),
    Embedded(EmbeddedRef),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedRef {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

impl DocRef {
    pub fn id(&self) -> &str {
        match self {
            DocRef::Id(id) => id,
            DocRef::Embedded(embedded) => &embedded.id,
        }
    }
}

/// A content item: title, description, rich content, status, categories, and
/// two optional images (thumbnail and cover).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub status: PostStatus,
    #[serde(default)]
    pub categories: Vec<DocRef>,
    #[serde(default)]
    pub authors: Vec<DocRef>,
    #[serde(default)]
    pub thumbnail_image: Option<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub thumbnail_image_alt: Option<String>,
    #[serde(default)]
    pub cover_image_alt: Option<String>,
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub meta_keywords: Vec<String>,
}

impl Post {
    /// Whether the given user id is listed among this post's authors.
    pub fn has_author(&self, user_id: &str) -> bool {
        self.authors.iter().any(|author| author.id() == user_id)
    }
}

/// The editable payload sent to the create/update post endpoints. Image
/// fields hold the durable public URLs committed by a successful upload.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDraft {
    pub title: String,
    pub description: String,
    pub content: String,
    pub status: PostStatus,
    pub categories: Vec<String>,
    pub thumbnail_image: String,
    pub cover_image: String,
    pub thumbnail_image_alt: String,
    pub cover_image_alt: String,
    pub meta_title: String,
    pub meta_description: String,
    pub meta_keywords: Vec<String>,
}

impl PostDraft {
    /// Seed a draft from an existing post for editing.
    pub fn from_post(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            description: post.description.clone(),
            content: post.content.clone(),
            status: post.status,
            categories: post.categories.iter().map(|c| c.id().to_string()).collect(),
            thumbnail_image: post.thumbnail_image.clone().unwrap_or_default(),
            cover_image: post.cover_image.clone().unwrap_or_default(),
            thumbnail_image_alt: post.thumbnail_image_alt.clone().unwrap_or_default(),
            cover_image_alt: post.cover_image_alt.clone().unwrap_or_default(),
            meta_title: post.meta_title.clone().unwrap_or_default(),
            meta_description: post.meta_description.clone().unwrap_or_default(),
            meta_keywords: post.meta_keywords.clone(),
        }
    }
}
