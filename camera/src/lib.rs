//! Capture sources for the visual assistant.
//!
//! Cameras produce [`Frame`]s on demand; the [`encode`] module turns a
//! frame into a compressed still image suitable for a recognizer.

pub mod camera;
pub mod encode;
pub mod folder;
pub mod frame;

pub use camera::{Camera, CameraError};
pub use encode::{encode_jpeg, EncodedImage};
pub use folder::FolderCamera;
pub use frame::Frame;
