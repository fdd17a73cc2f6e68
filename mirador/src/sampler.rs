use camera::{encode_jpeg, Camera};
use recognizer::Recognizer;
use speech::Announcer;
use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Arc, Mutex,
};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::{AnalysisGuard, Session};

/// How a single analysis pass ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PassOutcome {
    /// A result was recognized and announced.
    Announced(String),
    /// The pass ran but produced nothing worth announcing.
    Quiet,
    /// Another pass was in flight; this one was rejected, not queued.
    Dropped,
    /// The capture source had no usable frame yet.
    NoFrame,
    /// Capture stopped while the pass was in flight; result discarded.
    Stale,
    /// The pass failed; the loop continues at the next tick.
    Failed,
}

/// Everything one analysis pass needs, cloneable into the timer task.
#[derive(Clone)]
struct PassContext {
    camera: Arc<dyn Camera>,
    recognizer: Arc<dyn Recognizer>,
    announcer: Arc<Announcer>,
    session: Arc<Session>,
    guard: AnalysisGuard,
    generation: Arc<AtomicU64>,
    /// Set once a device failure has been spoken, so a dead camera is
    /// reported on the first failing tick only. Cleared by a good grab.
    camera_error_reported: Arc<AtomicBool>,
    max_width: u32,
    quality: u8,
}

impl PassContext {
    /// One capture → encode → recognize → announce cycle.
    async fn run_pass(&self) -> PassOutcome {
        let Some(_permit) = self.guard.try_begin() else {
            debug!("analysis in flight, tick dropped");
            return PassOutcome::Dropped;
        };
        let generation = self.generation.load(Ordering::SeqCst);

        let frame = match self.camera.grab().await {
            Ok(frame) => {
                self.camera_error_reported.store(false, Ordering::SeqCst);
                frame
            }
            Err(e) => {
                if self.generation.load(Ordering::SeqCst) != generation {
                    debug!("ignoring capture failure from a stopped capture");
                    return PassOutcome::Stale;
                }
                error!(?e, "frame capture failed");
                // Device errors are announced once, not re-spoken on
                // every failing tick.
                if !self.camera_error_reported.swap(true, Ordering::SeqCst) {
                    self.session
                        .set_status("No se pudo acceder a la cámara. Revisa permisos.");
                    self.announcer
                        .announce("No se pudo acceder a la cámara. Revisa los permisos.");
                }
                return PassOutcome::Failed;
            }
        };
        if frame.is_empty() {
            debug!("no frame with usable dimensions yet");
            return PassOutcome::NoFrame;
        }

        let image = match encode_jpeg(&frame, self.max_width, self.quality) {
            Ok(image) => image,
            Err(e) => {
                error!(?e, "frame encoding failed");
                if self.generation.load(Ordering::SeqCst) != generation {
                    return PassOutcome::Stale;
                }
                self.session.set_status("Error al analizar la imagen.");
                return PassOutcome::Failed;
            }
        };

        if self.generation.load(Ordering::SeqCst) == generation {
            self.session.set_status("Analizando imagen...");
        }
        match self.recognizer.describe(&image).await {
            Ok(result) => {
                // A stop while we were waiting bumped the generation; the
                // late result must not be applied or spoken.
                if self.generation.load(Ordering::SeqCst) != generation {
                    debug!("discarding result from a stopped capture");
                    return PassOutcome::Stale;
                }
                match result {
                    Some(message) => {
                        self.session.record_result(message.clone());
                        self.announcer.announce(&message);
                        self.session
                            .set_status("Análisis completado. Continuando...");
                        PassOutcome::Announced(message)
                    }
                    None => {
                        self.session
                            .set_status("Análisis completado. Continuando...");
                        PassOutcome::Quiet
                    }
                }
            }
            Err(e) => {
                error!(?e, "recognition failed");
                // A stopped session keeps its final status.
                if self.generation.load(Ordering::SeqCst) != generation {
                    return PassOutcome::Stale;
                }
                self.session.set_status("Error al analizar la imagen.");
                PassOutcome::Failed
            }
        }
    }
}

/// Timer-driven trigger for analysis passes.
///
/// Ticks are serialized through the [`AnalysisGuard`]; a tick arriving
/// while a pass is in flight is dropped, never queued.
pub struct Sampler {
    ctx: PassContext,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl Sampler {
    pub fn new(
        camera: Arc<dyn Camera>,
        recognizer: Arc<dyn Recognizer>,
        announcer: Arc<Announcer>,
        session: Arc<Session>,
        max_width: u32,
        quality: u8,
    ) -> Self {
        Self {
            ctx: PassContext {
                camera,
                recognizer,
                announcer,
                session,
                guard: AnalysisGuard::new(),
                generation: Arc::new(AtomicU64::new(0)),
                camera_error_reported: Arc::new(AtomicBool::new(false)),
                max_width,
                quality,
            },
            timer: Mutex::new(None),
        }
    }

    /// Start the repeating trigger; the first pass runs immediately.
    ///
    /// Idempotent: starting again replaces the previous timer, so two
    /// timers never run concurrently. Restart with a new `period` when
    /// configuration changes.
    pub fn start(&self, period: Duration) {
        // A restart is a fresh attempt at the device; report anew.
        self.ctx
            .camera_error_reported
            .store(false, Ordering::SeqCst);
        let ctx = self.ctx.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                // Each tick runs detached so a slow pass never delays the
                // schedule; overlapping ticks bounce off the guard instead.
                let ctx = ctx.clone();
                tokio::spawn(async move {
                    ctx.run_pass().await;
                });
            }
        });
        let mut timer = self.timer.lock().unwrap();
        if let Some(prev) = timer.replace(handle) {
            prev.abort();
        }
        self.ctx.session.set_active(true);
        info!(?period, "sampler started");
    }

    /// Clear the repeating trigger and release the camera.
    ///
    /// Bumps the generation counter so an in-flight pass, which cannot be
    /// cancelled, discards its result on completion.
    pub fn stop(&self) {
        if let Some(handle) = self.timer.lock().unwrap().take() {
            handle.abort();
        }
        self.ctx.generation.fetch_add(1, Ordering::SeqCst);
        self.ctx.announcer.interrupt();
        self.ctx.camera.release();
        self.ctx.session.set_active(false);
        info!("sampler stopped");
    }

    /// Run one pass outside the timer schedule (voice command trigger).
    /// Subject to the same in-flight guard as timed ticks.
    pub async fn trigger_now(&self) -> PassOutcome {
        self.ctx.run_pass().await
    }

    pub fn is_running(&self) -> bool {
        self.timer.lock().unwrap().is_some()
    }
}
