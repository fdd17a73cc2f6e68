use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Single-slot guard serializing analysis passes.
///
/// The state token is {idle, running}: a pass that finds the slot taken
/// is rejected outright, never queued.
#[derive(Clone, Default)]
pub struct AnalysisGuard {
    running: Arc<AtomicBool>,
}

impl AnalysisGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the slot. `None` means a pass is already in flight.
    pub fn try_begin(&self) -> Option<PassPermit> {
        self.running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| PassPermit {
                running: self.running.clone(),
            })
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

/// RAII token for one analysis pass; the slot frees when it drops.
pub struct PassPermit {
    running: Arc<AtomicBool>,
}

impl Drop for PassPermit {
    fn drop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
    }
}
