use base64::{engine::general_purpose, Engine as _};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use std::io::Cursor;

use crate::{CameraError, Frame};

/// A frame rasterized to a compressed still image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedImage {
    pub bytes: Vec<u8>,
    pub mime: String,
    pub width: u32,
    pub height: u32,
}

impl EncodedImage {
    /// Inline `data:` URL form used for remote multimodal requests.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, self.to_base64())
    }

    /// Bare base64 form, for APIs that take the encoded bytes directly.
    pub fn to_base64(&self) -> String {
        general_purpose::STANDARD.encode(&self.bytes)
    }
}

/// Rasterize `frame` to JPEG at the given `quality` (1-100).
///
/// Frames wider than `max_width` are downscaled to it, preserving aspect
/// ratio; narrower frames keep their native dimensions. Downscaling trades
/// recognition fidelity for a smaller payload. The caller must not pass an
/// empty frame (see [`Frame::is_empty`]).
pub fn encode_jpeg(
    frame: &Frame,
    max_width: u32,
    quality: u8,
) -> Result<EncodedImage, CameraError> {
    let (w, h) = (frame.width(), frame.height());
    let scaled;
    let pixels = if w > max_width {
        let new_h = ((h as u64 * max_width as u64) / w as u64).max(1) as u32;
        scaled = image::imageops::resize(&frame.pixels, max_width, new_h, FilterType::Triangle);
        &scaled
    } else {
        &frame.pixels
    };

    let mut bytes = Vec::new();
    let encoder = JpegEncoder::new_with_quality(Cursor::new(&mut bytes), quality);
    pixels.write_with_encoder(encoder)?;
    Ok(EncodedImage {
        bytes,
        mime: "image/jpeg".into(),
        width: pixels.width(),
        height: pixels.height(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    #[test]
    fn wide_frames_are_downscaled_to_max_width() {
        let frame = Frame::new(RgbImage::new(640, 480));
        let out = encode_jpeg(&frame, 320, 70).unwrap();
        assert_eq!(out.width, 320);
        assert_eq!(out.height, 240);
    }

    #[test]
    fn narrow_frames_keep_native_dimensions() {
        let frame = Frame::new(RgbImage::new(200, 150));
        let out = encode_jpeg(&frame, 320, 70).unwrap();
        assert_eq!((out.width, out.height), (200, 150));
    }

    #[test]
    fn aspect_ratio_is_preserved_on_odd_sizes() {
        let frame = Frame::new(RgbImage::new(1001, 333));
        let out = encode_jpeg(&frame, 500, 50).unwrap();
        assert_eq!(out.width, 500);
        // 333 * 500 / 1001, truncated
        assert_eq!(out.height, 166);
    }

    #[test]
    fn data_url_carries_mime_and_base64() {
        let frame = Frame::new(RgbImage::new(8, 8));
        let out = encode_jpeg(&frame, 320, 70).unwrap();
        let url = out.to_data_url();
        assert!(url.starts_with("data:image/jpeg;base64,"));
        assert!(url.len() > "data:image/jpeg;base64,".len());
    }
}
