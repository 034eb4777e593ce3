//! Orchestrates the presigned upload protocol against the live API.
//!
//! Per target: request a credential, PUT the raw bytes to the returned write
//! URL, and report the durable public URL on success. When both images change
//! in one submission, a single combined credential request covers both slots
//! and the two transfers run concurrently; each target succeeds or fails on
//! its own and neither blocks the other.

use futures::future;
use tracing::{debug, warn};

use crate::api::ApiClient;

use super::{
    ImageTypeParam, SelectedFile, UploadAttempt, UploadCredential, UploadKind, UploadMode,
    UploadState,
};

/// Terminal result of one target's attempt.
#[derive(Debug)]
pub struct UploadOutcome {
    kind: UploadKind,
    state: UploadState,
}

impl UploadOutcome {
    fn from_attempt(attempt: UploadAttempt) -> Self {
        Self {
            kind: attempt.kind(),
            state: attempt.state().clone(),
        }
    }

    pub fn kind(&self) -> UploadKind {
        self.kind
    }

    pub fn is_success(&self) -> bool {
        matches!(self.state, UploadState::Succeeded { .. })
    }

    /// The committed public URL, present only on success.
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

/// Per-target outcomes of one submission. A `None` slot was not requested.
#[derive(Debug, Default)]
pub struct UploadReport {
    pub thumbnail: Option<UploadOutcome>,
    pub cover: Option<UploadOutcome>,
}

pub struct UploadCoordinator {
    api: ApiClient,
}

impl UploadCoordinator {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Upload a single image and return its terminal outcome. The credential
    /// request failure message is surfaced verbatim; no retry is automatic -
    /// a retry is a fresh call.
    pub async fn upload(
        &self,
        mode: &UploadMode,
        kind: UploadKind,
        file: &SelectedFile,
    ) -> UploadOutcome {
        let mut attempt = UploadAttempt::new(kind);
        attempt.begin();

        match self.api.request_upload_credentials(mode, kind.image_type()).await {
            Ok(mut grants) => match grants.take_for(kind) {
                Some(credential) => {
                    attempt.credential_granted(credential);
                    self.transfer(&mut attempt, file).await;
                }
                None => {
                    warn!(kind = kind.label(), "Credential response missing grant");
                    attempt.credential_denied(format!(
                        "No upload credential issued for the {} image",
                        kind.label()
                    ));
                }
            },
            Err(e) => {
                warn!(kind = kind.label(), error = %e, "Credential request failed");
                attempt.credential_denied(e.to_string());
            }
        }

        UploadOutcome::from_attempt(attempt)
    }

    /// Upload whichever of the two images were selected. With both selected,
    /// one combined credential round trip covers both slots and the transfers
    /// run concurrently, reporting independently.
    pub async fn upload_both(
        &self,
        mode: &UploadMode,
        thumbnail: Option<&SelectedFile>,
        cover: Option<&SelectedFile>,
    ) -> UploadReport {
        match (thumbnail, cover) {
            (None, None) => UploadReport::default(),
            (Some(file), None) => UploadReport {
                thumbnail: Some(self.upload(mode, UploadKind::Thumbnail, file).await),
                cover: None,
            },
            (None, Some(file)) => UploadReport {
                thumbnail: None,
                cover: Some(self.upload(mode, UploadKind::Cover, file).await),
            },
            (Some(thumbnail_file), Some(cover_file)) => {
                let mut grants = match self
                    .api
                    .request_upload_credentials(mode, ImageTypeParam::Both)
                    .await
                {
                    Ok(grants) => grants,
                    Err(e) => {
                        // One denial fails both attempts at stage 1; neither
                        // transfer is invoked.
                        warn!(error = %e, "Combined credential request failed");
                        let reason = e.to_string();
                        return UploadReport {
                            thumbnail: Some(denied(UploadKind::Thumbnail, reason.clone())),
                            cover: Some(denied(UploadKind::Cover, reason)),
                        };
                    }
                };

                let thumbnail_grant = grants.take_for(UploadKind::Thumbnail);
                let cover_grant = grants.take_for(UploadKind::Cover);

                let (thumbnail_outcome, cover_outcome) = future::join(
                    self.run_granted(UploadKind::Thumbnail, thumbnail_grant, thumbnail_file),
                    self.run_granted(UploadKind::Cover, cover_grant, cover_file),
                )
                .await;

                UploadReport {
                    thumbnail: Some(thumbnail_outcome),
                    cover: Some(cover_outcome),
                }
            }
        }
    }

    /// Drive one attempt from a grant already extracted from a combined
    /// credential response.
    async fn run_granted(
        &self,
        kind: UploadKind,
        grant: Option<UploadCredential>,
        file: &SelectedFile,
    ) -> UploadOutcome {
        let mut attempt = UploadAttempt::new(kind);
        attempt.begin();

        match grant {
            Some(credential) => {
                attempt.credential_granted(credential);
                self.transfer(&mut attempt, file).await;
            }
            None => {
                warn!(kind = kind.label(), "Combined response missing grant");
                attempt.credential_denied(format!(
                    "No upload credential issued for the {} image",
                    kind.label()
                ));
            }
        }

        UploadOutcome::from_attempt(attempt)
    }

    /// Stage 2: move the raw bytes to storage. Only reachable with a granted
    /// credential; a failed attempt never gets here.
    async fn transfer(&self, attempt: &mut UploadAttempt, file: &SelectedFile) {
        let Some(credential) = attempt.credential() else {
            return;
        };
        let write_url = credential.write_url.clone();

        debug!(
            kind = attempt.kind().label(),
            file = %file.file_name,
            "Transferring bytes to storage"
        );

        match self
            .api
            .put_object(&write_url, file.bytes.clone(), &file.content_type)
            .await
        {
            Ok(()) => attempt.transfer_succeeded(),
            Err(e) => {
                warn!(kind = attempt.kind().label(), error = %e, "Storage transfer failed");
                attempt.transfer_failed();
            }
        }
    }
}

fn denied(kind: UploadKind, reason: String) -> UploadOutcome {
    let mut attempt = UploadAttempt::new(kind);
    attempt.begin();
    attempt.credential_denied(reason);
    UploadOutcome::from_attempt(attempt)
}
