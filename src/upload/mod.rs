//! Presigned upload workflow for post images.
//!
//! Moving a user-selected file into object storage is a strict three-stage
//! pipeline per image: obtain a single-use write credential from the backend,
//! transfer the raw bytes directly to storage, then commit the durable public
//! URL into the post draft. `attempt` models one image's trip through that
//! pipeline; `coordinator` performs the network calls and runs the thumbnail
//! and cover targets independently.

pub mod attempt;
pub mod coordinator;

pub use attempt::{
    ImageTypeParam, SelectedFile, UploadAttempt, UploadCredential, UploadGrants, UploadKind,
    UploadMode, UploadState,
};
pub use coordinator::{UploadCoordinator, UploadOutcome, UploadReport};
