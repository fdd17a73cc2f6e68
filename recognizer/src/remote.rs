use async_trait::async_trait;
use camera::EncodedImage;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Recognizer, RecognizerError};

const SYSTEM_PROMPT: &str = "Eres un asistente de visión experto en billetes mexicanos y \
peruanos que responde de forma breve y clara en español latino.";

const USER_PROMPT: &str = "Analiza la imagen y responde en una sola frase en español:
- Enumera brevemente los objetos principales (usa nombres simples: silla, mesa, persona, perro, etc.).
- Si aparece un billete mexicano o peruano, indica:
  * País y denominación (ej: \"billete peruano de 10 soles\", \"billete mexicano de 50 pesos\")
  * Valoración de autenticidad: \"billete auténtico\", \"posible billete falso\" o \"no es posible confirmar autenticidad\"
  * Para billetes mexicanos: busca ventana transparente, marca de agua, hilo de seguridad, relieve
  * Para billetes peruanos: busca marca de agua, hilo de seguridad, relieve, ventana transparente, cambio de color";

/// Client for an OpenAI-compatible multimodal chat-completion endpoint.
pub struct RemoteVision {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl RemoteVision {
    pub const DEFAULT_MODEL: &'static str = "gpt-4.1-mini";

    /// Create a client for `base_url` (e.g. `https://api.openai.com`).
    ///
    /// The bearer credential always comes from configuration; it is never
    /// baked into the binary.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: Self::DEFAULT_MODEL.into(),
        }
    }

    /// Override the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<OutMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct OutMessage<'a> {
    role: &'a str,
    content: Content<'a>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Content<'a> {
    Text(&'a str),
    Parts(Vec<Part<'a>>),
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Part<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}

#[async_trait]
impl Recognizer for RemoteVision {
    async fn describe(&self, image: &EncodedImage) -> Result<Option<String>, RecognizerError> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                OutMessage {
                    role: "system",
                    content: Content::Text(SYSTEM_PROMPT),
                },
                OutMessage {
                    role: "user",
                    content: Content::Parts(vec![
                        Part::Text { text: USER_PROMPT },
                        Part::ImageUrl {
                            image_url: ImageUrl {
                                url: image.to_data_url(),
                            },
                        },
                    ]),
                },
            ],
            // Bounded output and low temperature keep answers short and
            // repeatable across passes.
            max_tokens: 180,
            temperature: 0.2,
        };

        let res = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(RecognizerError::Endpoint {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = res.json().await?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .ok_or(RecognizerError::InvalidResponse)?
            .message
            .content
            .unwrap_or_default();
        let content = content.trim();
        debug!(len = content.len(), "remote vision answered");
        if content.is_empty() {
            Ok(None)
        } else {
            Ok(Some(content.to_string()))
        }
    }
}
