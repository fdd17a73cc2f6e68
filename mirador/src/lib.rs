//! Mirador: a headless visual assistant.
//!
//! Captures camera frames on a timer, describes them through a
//! [`recognizer::Recognizer`], and announces the result in Spanish. A
//! voice command can trigger an extra pass between timer ticks.

pub mod config;
pub mod guard;
pub mod logging;
pub mod sampler;
pub mod session;
pub mod stdin_transcriber;

pub use config::{Backend, Config};
pub use guard::{AnalysisGuard, PassPermit};
pub use sampler::{PassOutcome, Sampler};
pub use session::Session;
pub use stdin_transcriber::StdinTranscriber;
