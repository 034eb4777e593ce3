use thiserror::Error;

/// Error taxonomy for everything the client surfaces to a user.
///
/// The `Display` text is the user-facing notification; no error is silently
/// swallowed at the UI boundary and none is fatal to the process - every
/// operation is retryable by re-invoking the action.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Caught before any network call is made; never sent to the backend.
    #[error("{0}")]
    Validation(String),

    /// The backend answered `success: false`. Carries the backend's own
    /// message, resolved via `error.message` then `message` then a fallback.
    #[error("{0}")]
    Rejected(String),

    #[error("Unauthorized - please log in again")]
    Unauthorized,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success status from the direct storage write. The storage
    /// provider's error body is not assumed to be informative.
    #[error("Upload failed")]
    UploadFailed,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
