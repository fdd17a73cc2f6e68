use std::sync::Mutex;

#[derive(Default)]
struct Inner {
    active: bool,
    status: String,
    last_result: Option<String>,
}

/// Shared session state: whether capture runs, the current status line,
/// and the most recent recognition result. One value each, no history.
#[derive(Default)]
pub struct Session {
    inner: Mutex<Inner>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_active(&self, active: bool) {
        self.inner.lock().unwrap().active = active;
    }

    pub fn is_active(&self) -> bool {
        self.inner.lock().unwrap().active
    }

    pub fn set_status(&self, status: impl Into<String>) {
        let status = status.into();
        tracing::info!(%status);
        self.inner.lock().unwrap().status = status;
    }

    pub fn status(&self) -> String {
        self.inner.lock().unwrap().status.clone()
    }

    pub fn record_result(&self, result: impl Into<String>) {
        self.inner.lock().unwrap().last_result = Some(result.into());
    }

    pub fn last_result(&self) -> Option<String> {
        self.inner.lock().unwrap().last_result.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_latest_result_only() {
        let session = Session::new();
        assert_eq!(session.last_result(), None);
        session.record_result("Hay silla.");
        session.record_result("Hay mesa.");
        assert_eq!(session.last_result().as_deref(), Some("Hay mesa."));
    }
}
