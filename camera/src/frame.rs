use chrono::{DateTime, Utc};
use image::RgbImage;

/// A single decoded camera frame.
#[derive(Clone, Debug)]
pub struct Frame {
    /// RGB pixel data.
    pub pixels: RgbImage,
    /// Timestamp of when the frame was captured.
    pub at: DateTime<Utc>,
}

impl Frame {
    /// Wrap an already-decoded image with the current timestamp.
    pub fn new(pixels: RgbImage) -> Self {
        Self {
            pixels,
            at: Utc::now(),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// A frame with no pixels yet. The sampler skips its tick on these
    /// rather than handing them to the encoder.
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}
