//! Speech I/O: announcing recognition results and listening for voice
//! commands.

pub mod announcer;
pub mod listener;
pub mod tts;

pub use announcer::{Announcer, AudioSink, NullSink};
pub use listener::{Intent, IntentTable, Listener, ListenerError, RetryPolicy, Transcriber};
pub use tts::{CoquiTts, SpeechStyle, Tts};
