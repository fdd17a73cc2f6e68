use async_trait::async_trait;
use glob::glob;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::fs;

use crate::{Camera, CameraError, Frame};

/// Reads image files from disk as simulated webcam frames.
///
/// Cycles through every file matching the glob pattern, decoding one per
/// [`grab`](Camera::grab). Stands in for a real environment-facing device
/// on machines without one.
pub struct FolderCamera {
    paths: Vec<PathBuf>,
    index: AtomicUsize,
    released: AtomicBool,
}

impl FolderCamera {
    /// Create a new camera that cycles files matching `pattern`.
    pub fn new(pattern: &str) -> Result<Self, CameraError> {
        let paths: Vec<PathBuf> = glob(pattern)
            .map_err(|e| CameraError::Unavailable(e.msg.to_string()))?
            .filter_map(Result::ok)
            .collect();
        if paths.is_empty() {
            return Err(CameraError::Unavailable(format!(
                "no frames match {pattern}"
            )));
        }
        Ok(Self {
            paths,
            index: AtomicUsize::new(0),
            released: AtomicBool::new(false),
        })
    }
}

#[async_trait]
impl Camera for FolderCamera {
    async fn grab(&self) -> Result<Frame, CameraError> {
        if self.released.load(Ordering::SeqCst) {
            return Err(CameraError::Unavailable("camera released".into()));
        }
        let i = self.index.fetch_add(1, Ordering::SeqCst) % self.paths.len();
        let path = &self.paths[i];
        let bytes = fs::read(path).await?;
        let img = image::load_from_memory(&bytes)?;
        tracing::debug!(path = %path.display(), "grabbed frame");
        Ok(Frame::new(img.to_rgb8()))
    }

    fn release(&self) {
        self.released.store(true, Ordering::SeqCst);
    }

    fn is_released(&self) -> bool {
        self.released.load(Ordering::SeqCst)
    }
}
