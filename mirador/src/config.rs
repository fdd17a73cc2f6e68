use clap::{Parser, ValueEnum};
use std::time::Duration;

/// Which recognizer backend turns frames into descriptions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// OpenAI-compatible multimodal chat-completion endpoint.
    Remote,
    /// Detection model on a locally hosted Ollama server.
    Local,
}

#[derive(Parser, Clone, Debug)]
#[command(author, version, about)]
pub struct Config {
    /// Glob pattern of image files served as camera frames
    #[arg(long, env = "MIRADOR_FRAMES", default_value = "frames/*.jpg")]
    pub frames: String,

    /// Recognition backend
    #[arg(long, env = "MIRADOR_BACKEND", value_enum, default_value_t = Backend::Remote)]
    pub backend: Backend,

    /// Base URL of the remote recognition endpoint
    #[arg(long, env = "OPENAI_BASE_URL", default_value = "https://api.openai.com")]
    pub openai_url: String,

    /// Bearer credential for the remote recognizer. Required for the
    /// remote backend; supplied via environment, never baked in.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Remote model identifier override
    #[arg(long, env = "MIRADOR_MODEL")]
    pub model: Option<String>,

    /// Ollama server for the local backend
    #[arg(long, env = "OLLAMA_URL", default_value = "http://localhost:11434")]
    pub ollama_url: String,

    /// Preferred local detection model tag
    #[arg(long, env = "MIRADOR_DETECTION_MODEL", default_value = "llava")]
    pub detection_model: String,

    /// Confidence threshold for local detections
    #[arg(long, env = "MIRADOR_THRESHOLD", default_value_t = 0.5)]
    pub threshold: f32,

    /// Coqui-style TTS endpoint
    #[arg(long, env = "COQUI_URL", default_value = "http://localhost:5002/api/tts")]
    pub tts_url: String,

    /// TTS voice
    #[arg(long, env = "SPEAKER")]
    pub speaker: Option<String>,

    /// Maximum encoded frame width; wider frames are downscaled
    #[arg(long, env = "MIRADOR_MAX_WIDTH", default_value_t = 640)]
    pub max_width: u32,

    /// Sample less often and compress harder
    #[arg(long, env = "MIRADOR_POWER_SAVING")]
    pub power_saving: bool,

    /// Do not run the timer; analyze only on voice command
    #[arg(long, env = "MIRADOR_NO_AUTO_DETECT")]
    pub no_auto_detect: bool,
}

impl Config {
    /// Effective sampling period for the chosen backend and power mode.
    pub fn period(&self) -> Duration {
        let secs = match (self.backend, self.power_saving) {
            (Backend::Local, false) => 3,
            (Backend::Remote, false) => 5,
            (Backend::Local, true) => 10,
            (Backend::Remote, true) => 30,
        };
        Duration::from_secs(secs)
    }

    /// Effective JPEG quality for the power mode.
    pub fn quality(&self) -> u8 {
        if self.power_saving {
            50
        } else {
            70
        }
    }

    /// Whether the sampler runs on its own timer.
    pub fn auto_detect(&self) -> bool {
        !self.no_auto_detect
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        Config::try_parse_from([&["mirador"], args].concat()).unwrap()
    }

    #[test]
    fn power_saving_slows_the_loop_and_compresses_harder() {
        let normal = parse(&["--backend", "remote"]);
        assert_eq!(normal.period(), Duration::from_secs(5));
        assert_eq!(normal.quality(), 70);

        let saving = parse(&["--backend", "remote", "--power-saving"]);
        assert_eq!(saving.period(), Duration::from_secs(30));
        assert_eq!(saving.quality(), 50);
    }

    #[test]
    fn local_backend_samples_faster() {
        let local = parse(&["--backend", "local"]);
        assert_eq!(local.period(), Duration::from_secs(3));
        let saving = parse(&["--backend", "local", "--power-saving"]);
        assert_eq!(saving.period(), Duration::from_secs(10));
    }

    #[test]
    fn auto_detect_defaults_on() {
        assert!(parse(&[]).auto_detect());
        assert!(!parse(&["--no-auto-detect"]).auto_detect());
    }
}
