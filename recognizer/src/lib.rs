//! Turns a still image into a descriptive Spanish sentence.
//!
//! Two interchangeable backends implement [`Recognizer`]: a remote
//! multimodal chat-completion endpoint ([`RemoteVision`]) and a local
//! detection pipeline ([`LocalDetector`]) fed by any [`DetectionModel`].

pub mod labels;
pub mod local;
pub mod ollama;
pub mod remote;
pub mod traits;

pub use local::{Detection, DetectionModel, LocalDetector};
pub use ollama::OllamaDetector;
pub use remote::RemoteVision;
pub use traits::{Recognizer, RecognizerError};
