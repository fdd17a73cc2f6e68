use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::info;

/// Delivery parameters for spoken output.
#[derive(Clone, Debug, PartialEq)]
pub struct SpeechStyle {
    /// BCP-47 language tag.
    pub language: String,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl Default for SpeechStyle {
    /// Spanish at a slightly slowed rate, as announcements are meant to be
    /// followed without a screen.
    fn default() -> Self {
        Self {
            language: "es-ES".into(),
            rate: 0.8,
            pitch: 1.0,
            volume: 1.0,
        }
    }
}

/// Text-to-speech engine interface.
#[async_trait]
pub trait Tts: Send + Sync {
    /// Return WAV bytes for `text`.
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>>;
}

/// Client for a Coqui TTS server.
#[derive(Clone)]
pub struct CoquiTts {
    url: String,
    client: Client,
    speaker_id: Option<String>,
    /// Optional language code passed as the `language_id` query parameter.
    language_id: Option<String>,
}

impl CoquiTts {
    /// Create a new client targeting `url` (e.g. `http://localhost:5002/api/tts`).
    ///
    /// Optional `speaker_id` selects the voice; `language_id` picks the
    /// synthesis language when the installed model supports several.
    pub fn new(
        url: impl Into<String>,
        speaker_id: Option<String>,
        language_id: Option<String>,
    ) -> Self {
        Self {
            url: url.into(),
            client: Client::new(),
            speaker_id,
            language_id,
        }
    }
}

#[async_trait]
impl Tts for CoquiTts {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        let mut url = Url::parse(&self.url)?;
        {
            let mut qp = url.query_pairs_mut();
            qp.append_pair("text", text);
            qp.append_pair("speaker_id", self.speaker_id.as_deref().unwrap_or("p123"));
            qp.append_pair("style_wav", "");
            qp.append_pair("language_id", self.language_id.as_deref().unwrap_or("es"));
        }
        info!(%url, "requesting TTS");
        let resp = self.client.get(url).send().await?.error_for_status()?;
        Ok(resp.bytes().await?.to_vec())
    }
}
