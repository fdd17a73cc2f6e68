use async_trait::async_trait;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};
use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::{SpeechStyle, Tts};

/// Destination for synthesized audio.
///
/// The real service hands bytes to an output device or downstream
/// consumer; tests observe utterances through this seam.
#[async_trait]
pub trait AudioSink: Send + Sync {
    async fn play(&self, wav: Vec<u8>, style: &SpeechStyle);
}

/// Sink that drops the audio, logging what would have been played.
pub struct NullSink;

#[async_trait]
impl AudioSink for NullSink {
    async fn play(&self, wav: Vec<u8>, style: &SpeechStyle) {
        debug!(bytes = wav.len(), language = %style.language, "discarding audio");
    }
}

/// Speaks recognition results, one utterance at a time.
///
/// Each new announcement interrupts the previous one; there is no queue.
pub struct Announcer {
    tts: Arc<dyn Tts>,
    sink: Arc<dyn AudioSink>,
    style: SpeechStyle,
    speaking: Arc<AtomicBool>,
    current: Mutex<Option<JoinHandle<()>>>,
}

impl Announcer {
    pub fn new(tts: Arc<dyn Tts>, sink: Arc<dyn AudioSink>, style: SpeechStyle) -> Self {
        Self {
            tts,
            sink,
            style,
            speaking: Arc::new(AtomicBool::new(false)),
            current: Mutex::new(None),
        }
    }

    /// Cancel any in-flight utterance and speak `text`.
    ///
    /// Synthesis failures degrade to a logged error; a broken TTS engine
    /// must never take the analysis loop down with it.
    pub fn announce(&self, text: &str) {
        let text = text.to_string();
        let tts = self.tts.clone();
        let sink = self.sink.clone();
        let style = self.style.clone();
        let speaking = self.speaking.clone();

        // Interrupt the previous utterance before spawning the new one so
        // its flag reset cannot clobber ours.
        let mut current = self.current.lock().unwrap();
        if let Some(prev) = current.take() {
            prev.abort();
        }
        self.speaking.store(false, Ordering::SeqCst);

        *current = Some(tokio::spawn(async move {
            speaking.store(true, Ordering::SeqCst);
            match tts.synthesize(&text).await {
                Ok(wav) => sink.play(wav, &style).await,
                Err(e) => error!(?e, "tts request failed"),
            }
            speaking.store(false, Ordering::SeqCst);
        }));
    }

    /// Interrupt the in-flight utterance, if any.
    pub fn interrupt(&self) {
        if let Some(prev) = self.current.lock().unwrap().take() {
            prev.abort();
        }
        self.speaking.store(false, Ordering::SeqCst);
    }

    /// Whether an utterance is currently being produced.
    pub fn speaking(&self) -> bool {
        self.speaking.load(Ordering::SeqCst)
    }

    /// Wait for the in-flight utterance to finish. Test helper, also used
    /// on shutdown so a final status line is not cut off.
    pub async fn join(&self) {
        let handle = self.current.lock().unwrap().take();
        if let Some(h) = handle {
            let _ = h.await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::time::Duration;
    use tokio::sync::Mutex as AsyncMutex;

    struct SlowTts {
        delay: Duration,
    }

    #[async_trait]
    impl Tts for SlowTts {
        async fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
            tokio::time::sleep(self.delay).await;
            Ok(text.as_bytes().to_vec())
        }
    }

    struct FailingTts;

    #[async_trait]
    impl Tts for FailingTts {
        async fn synthesize(&self, _text: &str) -> Result<Vec<u8>> {
            anyhow::bail!("engine offline")
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        played: AsyncMutex<Vec<String>>,
    }

    #[async_trait]
    impl AudioSink for RecordingSink {
        async fn play(&self, wav: Vec<u8>, _style: &SpeechStyle) {
            self.played
                .lock()
                .await
                .push(String::from_utf8(wav).unwrap());
        }
    }

    #[tokio::test]
    async fn new_announcement_interrupts_previous() {
        let sink = Arc::new(RecordingSink::default());
        let announcer = Announcer::new(
            Arc::new(SlowTts {
                delay: Duration::from_millis(100),
            }),
            sink.clone(),
            SpeechStyle::default(),
        );

        announcer.announce("uno");
        tokio::time::sleep(Duration::from_millis(10)).await;
        announcer.announce("dos");
        announcer.join().await;

        assert_eq!(*sink.played.lock().await, vec!["dos".to_string()]);
    }

    #[tokio::test]
    async fn speaking_flag_clears_after_utterance() {
        let sink = Arc::new(RecordingSink::default());
        let announcer = Announcer::new(
            Arc::new(SlowTts {
                delay: Duration::from_millis(20),
            }),
            sink,
            SpeechStyle::default(),
        );

        announcer.announce("hola");
        tokio::time::sleep(Duration::from_millis(5)).await;
        assert!(announcer.speaking());
        announcer.join().await;
        assert!(!announcer.speaking());
    }

    #[tokio::test]
    async fn tts_failure_does_not_panic_or_play() {
        let sink = Arc::new(RecordingSink::default());
        let announcer = Announcer::new(Arc::new(FailingTts), sink.clone(), SpeechStyle::default());

        announcer.announce("hola");
        announcer.join().await;

        assert!(sink.played.lock().await.is_empty());
        assert!(!announcer.speaking());
    }

    #[tokio::test]
    async fn interrupt_stops_speech() {
        let sink = Arc::new(RecordingSink::default());
        let announcer = Announcer::new(
            Arc::new(SlowTts {
                delay: Duration::from_millis(100),
            }),
            sink.clone(),
            SpeechStyle::default(),
        );

        announcer.announce("uno");
        tokio::time::sleep(Duration::from_millis(10)).await;
        announcer.interrupt();
        tokio::time::sleep(Duration::from_millis(150)).await;

        assert!(sink.played.lock().await.is_empty());
        assert!(!announcer.speaking());
    }
}
