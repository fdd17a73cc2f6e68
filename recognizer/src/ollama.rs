use anyhow::Context;
use async_trait::async_trait;
use camera::EncodedImage;
use ollama_rs::{
    generation::{completion::request::GenerationRequest, images::Image},
    Ollama,
};
use serde::Deserialize;
use tracing::{info, warn};

use crate::{Detection, DetectionModel};

const DETECT_PROMPT: &str = "List every object visible in this image as a JSON array of \
objects with fields \"label\" (a simple English COCO-style noun) and \"score\" (your \
confidence between 0 and 1). Respond with the JSON array only.";

/// [`DetectionModel`] backed by a vision model on a locally hosted Ollama
/// server.
pub struct OllamaDetector {
    client: Ollama,
    model: String,
}

impl OllamaDetector {
    /// Model used when the preferred one is not installed.
    pub const FALLBACK_MODEL: &'static str = "llava";

    /// Connect to `base_url` and pick a model once at startup.
    ///
    /// Probes for `preferred` among the installed models and falls back to
    /// [`Self::FALLBACK_MODEL`] when it is missing, so an accelerated or
    /// fine-tuned tag can be requested without being required.
    pub async fn load(base_url: &str, preferred: &str) -> anyhow::Result<Self> {
        let client = Ollama::try_new(base_url).context("invalid ollama url")?;
        let installed = client
            .list_local_models()
            .await
            .context("failed to query models from server")?;
        let model = if installed.iter().any(|m| m.name == preferred) {
            preferred.to_string()
        } else {
            warn!(preferred, fallback = Self::FALLBACK_MODEL, "model not installed, falling back");
            Self::FALLBACK_MODEL.to_string()
        };
        info!(%model, "detection model ready");
        Ok(Self { client, model })
    }
}

#[derive(Deserialize)]
struct RawDetection {
    label: String,
    #[serde(default = "full_confidence")]
    score: f32,
}

fn full_confidence() -> f32 {
    1.0
}

/// Pull a JSON array out of a model answer that may wrap it in prose or a
/// fenced code block.
fn parse_detections(answer: &str) -> Option<Vec<Detection>> {
    let start = answer.find('[')?;
    let end = answer.rfind(']')?;
    let raw: Vec<RawDetection> = serde_json::from_str(&answer[start..=end]).ok()?;
    Some(
        raw.into_iter()
            .map(|d| Detection {
                label: d.label,
                score: d.score,
            })
            .collect(),
    )
}

#[async_trait]
impl DetectionModel for OllamaDetector {
    async fn detect(&self, image: &EncodedImage) -> anyhow::Result<Vec<Detection>> {
        let req = GenerationRequest::new(self.model.clone(), DETECT_PROMPT.to_string())
            .add_image(Image::from_base64(&image.to_base64()));
        let res = self.client.generate(req).await.map_err(|e| {
            anyhow::anyhow!("ollama generation failed: {e}")
        })?;
        match parse_detections(&res.response) {
            Some(dets) => Ok(dets),
            None => {
                warn!(answer = %res.response, "unparseable detection answer");
                Ok(Vec::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_json_array() {
        let dets = parse_detections(r#"[{"label":"dog","score":0.8}]"#).unwrap();
        assert_eq!(dets.len(), 1);
        assert_eq!(dets[0].label, "dog");
    }

    #[test]
    fn parses_fenced_answer_with_prose() {
        let answer = "Sure! Here you go:\n```json\n[{\"label\":\"person\",\"score\":0.9},{\"label\":\"chair\"}]\n```";
        let dets = parse_detections(answer).unwrap();
        assert_eq!(dets.len(), 2);
        assert_eq!(dets[1].score, 1.0);
    }

    #[test]
    fn prose_without_json_is_none() {
        assert!(parse_detections("I see a dog and a chair.").is_none());
    }
}
