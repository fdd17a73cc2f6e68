use anyhow::Context;
use camera::{Camera, FolderCamera};
use clap::Parser;
use mirador::{logging, Backend, Config, Sampler, Session, StdinTranscriber};
use recognizer::{LocalDetector, OllamaDetector, Recognizer, RemoteVision};
use speech::{Announcer, CoquiTts, IntentTable, Listener, NullSink, SpeechStyle, Tts};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::parse();
    logging::init();

    let camera: Arc<dyn Camera> =
        Arc::new(FolderCamera::new(&config.frames).context("no capture source")?);

    let recognizer: Arc<dyn Recognizer> = match config.backend {
        Backend::Remote => {
            let api_key = config
                .api_key
                .clone()
                .context("the remote backend needs OPENAI_API_KEY")?;
            let mut vision = RemoteVision::new(config.openai_url.clone(), api_key);
            if let Some(model) = &config.model {
                vision = vision.with_model(model.clone());
            }
            Arc::new(vision)
        }
        Backend::Local => {
            let model = OllamaDetector::load(&config.ollama_url, &config.detection_model)
                .await
                .context("could not load a detection model")?;
            Arc::new(LocalDetector::new(Arc::new(model)).with_threshold(config.threshold))
        }
    };

    let tts: Arc<dyn Tts> = Arc::new(CoquiTts::new(
        config.tts_url.clone(),
        config.speaker.clone(),
        Some("es".into()),
    ));
    let announcer = Arc::new(Announcer::new(tts, Arc::new(NullSink), SpeechStyle::default()));
    let session = Arc::new(Session::new());

    let sampler = Arc::new(Sampler::new(
        camera,
        recognizer,
        announcer.clone(),
        session.clone(),
        config.max_width,
        config.quality(),
    ));

    session.set_status("Cámara activa. Analizando entorno...");
    announcer.announce("Cámara activada. Comenzando detección automática.");

    if config.auto_detect() {
        sampler.start(config.period());
    } else {
        info!("auto-detect off; passes run on voice command only");
    }

    let (intent_tx, mut intent_rx) = mpsc::channel(8);
    let listener = Listener::new(StdinTranscriber::new(), IntentTable::default_spanish());
    tokio::spawn(listener.run(intent_tx));

    loop {
        tokio::select! {
            intent = intent_rx.recv() => {
                match intent {
                    Some(intent) => {
                        info!(?intent, "running voice-triggered pass");
                        sampler.trigger_now().await;
                    }
                    None => break,
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    sampler.stop();
    announcer.join().await;
    info!(last = ?session.last_result(), "shut down");
    Ok(())
}
