use async_trait::async_trait;
use thiserror::Error;

use crate::Frame;

#[derive(Debug, Error)]
pub enum CameraError {
    /// The user or platform denied access to the capture device.
    #[error("camera access denied: {0}")]
    Denied(String),
    /// No usable device, or the device has been released.
    #[error("camera unavailable: {0}")]
    Unavailable(String),
    #[error("camera i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("image codec error: {0}")]
    Codec(#[from] image::ImageError),
}

/// A live capture source.
///
/// Implementations hand out the most recent frame on [`grab`](Camera::grab)
/// and must release every acquired device handle on
/// [`release`](Camera::release). Grabbing after release fails with
/// [`CameraError::Unavailable`].
#[async_trait]
pub trait Camera: Send + Sync {
    /// Capture the current frame.
    async fn grab(&self) -> Result<Frame, CameraError>;

    /// Stop capture and release the underlying device.
    fn release(&self);

    /// Whether the source still holds its device.
    fn is_released(&self) -> bool;
}
