use async_trait::async_trait;
use camera::EncodedImage;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecognizerError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    /// Non-success status from the remote endpoint; the response body is
    /// surfaced as the failure detail.
    #[error("recognizer endpoint returned {status}: {body}")]
    Endpoint { status: u16, body: String },
    #[error("model error: {0}")]
    Model(String),
    #[error("invalid recognizer response")]
    InvalidResponse,
}

/// Produces a human-readable description of a still image.
///
/// At most one invocation may be outstanding at a time per sampler; the
/// sampler's analysis guard enforces this, not the implementation.
#[async_trait]
pub trait Recognizer: Send + Sync {
    /// Describe `image` in one Spanish sentence.
    ///
    /// `Ok(None)` means the pass produced nothing worth announcing.
    async fn describe(&self, image: &EncodedImage) -> Result<Option<String>, RecognizerError>;
}
