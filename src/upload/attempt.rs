use serde::Deserialize;

/// Which image slot on a post an upload feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Thumbnail,
    Cover,
}

impl UploadKind {
    pub fn label(&self) -> &'static str {
        match self {
            UploadKind::Thumbnail => "thumbnail",
            UploadKind::Cover => "cover",
        }
    }

    /// The wire value requesting a credential for just this slot.
    pub fn image_type(&self) -> ImageTypeParam {
        match self {
            UploadKind::Thumbnail => ImageTypeParam::ThumbnailImage,
            UploadKind::Cover => ImageTypeParam::CoverImage,
        }
    }
}

/// Whether credentials are scoped to a brand-new post or an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadMode {
    Create,
    Edit { blog_id: String },
}

impl UploadMode {
    pub fn as_query(&self) -> &'static str {
        match self {
            UploadMode::Create => "create",
            UploadMode::Edit { .. } => "edit",
        }
    }
}

/// Wire value for the `imageType` query parameter. `Both` asks for both
/// slots' credentials in one round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageTypeParam {
    ThumbnailImage,
    CoverImage,
    Both,
}

impl ImageTypeParam {
    pub fn as_query(&self) -> &'static str {
        match self {
            ImageTypeParam::ThumbnailImage => "thumbnailImage",
            ImageTypeParam::CoverImage => "coverImage",
            ImageTypeParam::Both => "both",
        }
    }
}

/// A single-use grant for one direct-to-storage write: the short-lived
/// destination the bytes go to, and the durable location to persist on the
/// post once the transfer succeeds. Owned by one in-flight attempt and
/// discarded after use.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UploadCredential {
    #[serde(rename = "presignedUrl")]
    pub write_url: String,
    #[serde(rename = "s3Url")]
    pub public_url: String,
}

/// Credential issuance response; carries one or both slots depending on the
/// requested `imageType`.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadGrants {
    #[serde(rename = "thumbnailImage")]
    pub thumbnail_image: Option<UploadCredential>,
    #[serde(rename = "coverImage")]
    pub cover_image: Option<UploadCredential>,
}

impl UploadGrants {
    pub fn take_for(&mut self, kind: UploadKind) -> Option<UploadCredential> {
        match kind {
            UploadKind::Thumbnail => self.thumbnail_image.take(),
            UploadKind::Cover => self.cover_image.take(),
        }
    }
}

/// A user-selected local file: raw bytes plus the declared MIME type. The
/// bytes are sent to storage as-is, never re-encoded.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub file_name: String,
}

/// Pipeline state of one attempt. Progresses strictly
/// idle -> requesting credential -> uploading -> succeeded | failed. Failure
/// at any stage is terminal; retrying means a fresh attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadState {
    Idle,
    RequestingCredential,
    Uploading,
    Succeeded { public_url: String },
    Failed { reason: String },
}

/// One image's trip through the three-stage pipeline.
///
/// Transition methods are pure bookkeeping; the coordinator performs the
/// network calls between them and never reorders the stages: the transfer
/// cannot begin without a granted credential, and the commit (the public URL
/// in `Succeeded`) only appears after the transfer reports success.
#[derive(Debug)]
pub struct UploadAttempt {
    kind: UploadKind,
    state: UploadState,
    credential: Option<UploadCredential>,
}

impl UploadAttempt {
    pub fn new(kind: UploadKind) -> Self {
        Self {
            kind,
            state: UploadState::Idle,
            credential: None,
        }
    }

    pub fn kind(&self) -> UploadKind {
        self.kind
    }

    pub fn state(&self) -> &UploadState {
        &self.state
    }

    /// The granted credential, present only while uploading.
    pub fn credential(&self) -> Option<&UploadCredential> {
        self.credential.as_ref()
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self.state,
            UploadState::Succeeded { .. } | UploadState::Failed { .. }
        )
    }

    /// Stage 1 begins: the credential request is in flight.
    pub fn begin(&mut self) {
        debug_assert_eq!(self.state, UploadState::Idle);
        self.state = UploadState::RequestingCredential;
    }

    /// Stage 1 succeeded; stage 2 (the byte transfer) may begin.
    pub fn credential_granted(&mut self, credential: UploadCredential) {
        debug_assert_eq!(self.state, UploadState::RequestingCredential);
        self.credential = Some(credential);
        self.state = UploadState::Uploading;
    }

    /// Stage 1 failed. The backend's message is surfaced verbatim and the
    /// transfer is never invoked for this attempt.
    pub fn credential_denied(&mut self, reason: String) {
        debug_assert_eq!(self.state, UploadState::RequestingCredential);
        self.state = UploadState::Failed { reason };
    }

    /// Stage 2 succeeded: commit by exposing the durable public URL. The
    /// spent credential is discarded. Without a held credential there is
    /// nothing to commit and the attempt fails instead; an empty URL never
    /// reaches `Succeeded`.
    pub fn transfer_succeeded(&mut self) {
        debug_assert_eq!(self.state, UploadState::Uploading);
        self.state = match self.credential.take() {
            Some(credential) => UploadState::Succeeded {
                public_url: credential.public_url,
            },
            None => UploadState::Failed {
                reason: format!("Failed to upload {} image", self.kind.label()),
            },
        };
    }

    /// Stage 2 failed with a non-success storage status. Generic signal only;
    /// the storage provider's body is not parsed.
    pub fn transfer_failed(&mut self) {
        debug_assert_eq!(self.state, UploadState::Uploading);
        self.credential = None;
        self.state = UploadState::Failed {
            reason: format!("Failed to upload {} image", self.kind.label()),
        };
    }

    pub fn public_url(&self) -> Option<&str> {
        match &self.state {
            UploadState::Succeeded { public_url } => Some(public_url),
            _ => None,
        }
    }

    pub fn failure_reason(&self) -> Option<&str> {
        match &self.state {
            UploadState::Failed { reason } => Some(reason),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credential(n: u32) -> UploadCredential {
        UploadCredential {
            write_url: format!("https://bucket.example.com/put/{}", n),
            public_url: format!("https://cdn.example.com/obj/{}", n),
        }
    }

    #[test]
    fn test_happy_path_pipeline() {
        let mut attempt = UploadAttempt::new(UploadKind::Thumbnail);
        assert_eq!(*attempt.state(), UploadState::Idle);

        attempt.begin();
        assert_eq!(*attempt.state(), UploadState::RequestingCredential);
        assert!(attempt.credential().is_none());

        attempt.credential_granted(credential(1));
        assert_eq!(*attempt.state(), UploadState::Uploading);
        assert!(attempt.credential().is_some());

        attempt.transfer_succeeded();
        assert_eq!(attempt.public_url(), Some("https://cdn.example.com/obj/1"));
        // Credential is single-use: spent on commit
        assert!(attempt.credential().is_none());
        assert!(attempt.is_terminal());
    }

    #[test]
    fn test_credential_denial_is_terminal_without_transfer() {
        let mut attempt = UploadAttempt::new(UploadKind::Cover);
        attempt.begin();
        attempt.credential_denied("quota exceeded".to_string());

        assert!(attempt.is_terminal());
        assert_eq!(attempt.failure_reason(), Some("quota exceeded"));
        // No credential was ever granted, so stage 2 has nothing to write to
        assert!(attempt.credential().is_none());
        assert!(attempt.public_url().is_none());
    }

    #[test]
    fn test_transfer_failure_reports_generic_reason() {
        let mut attempt = UploadAttempt::new(UploadKind::Cover);
        attempt.begin();
        attempt.credential_granted(credential(2));
        attempt.transfer_failed();

        assert_eq!(attempt.failure_reason(), Some("Failed to upload cover image"));
        assert!(attempt.public_url().is_none());
    }

    #[test]
    fn test_targets_fail_independently() {
        // Both attempts granted from one combined credential response;
        // the thumbnail transfer fails, the cover commits regardless.
        let mut thumbnail = UploadAttempt::new(UploadKind::Thumbnail);
        let mut cover = UploadAttempt::new(UploadKind::Cover);
        thumbnail.begin();
        cover.begin();
        thumbnail.credential_granted(credential(1));
        cover.credential_granted(credential(2));

        thumbnail.transfer_failed();
        cover.transfer_succeeded();

        assert!(thumbnail.failure_reason().is_some());
        assert_eq!(cover.public_url(), Some("https://cdn.example.com/obj/2"));
    }

    #[test]
    #[should_panic]
    fn test_commit_before_transfer_trips_the_guard() {
        let mut attempt = UploadAttempt::new(UploadKind::Thumbnail);
        attempt.begin();
        // No credential granted; committing here is a pipeline misuse
        attempt.transfer_succeeded();
    }

    #[test]
    fn test_grants_parse_wire_names() {
        let json = r#"{
            "thumbnailImage": {"presignedUrl": "https://w/1", "s3Url": "https://p/1"},
            "coverImage": {"presignedUrl": "https://w/2", "s3Url": "https://p/2"}
        }"#;
        let mut grants: UploadGrants = serde_json::from_str(json).unwrap();
        assert_eq!(
            grants.take_for(UploadKind::Thumbnail).unwrap().write_url,
            "https://w/1"
        );
        assert_eq!(
            grants.take_for(UploadKind::Cover).unwrap().public_url,
            "https://p/2"
        );
        // Single-use: taking again yields nothing
        assert!(grants.take_for(UploadKind::Thumbnail).is_none());
    }
}
