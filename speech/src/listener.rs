use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

#[derive(Debug, Error)]
pub enum ListenerError {
    /// Microphone access revoked or never granted. Never retried.
    #[error("speech input permission denied")]
    PermissionDenied,
    /// Recoverable engine or transport hiccup.
    #[error("transient listener error: {0}")]
    Transient(String),
}

/// Continuous speech recognition source producing finalized utterances.
#[async_trait]
pub trait Transcriber: Send {
    /// Wait for the next finalized (non-interim) utterance.
    async fn next_final(&mut self) -> Result<String, ListenerError>;
}

/// Action requested by a recognized voice command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    /// Run one analysis pass right now, outside the sampler's schedule.
    AnalyzeNow,
}

/// Declarative phrase-set to action mapping.
///
/// Matching is case- and accent-insensitive and fires when the phrase
/// appears anywhere in the utterance.
pub struct IntentTable {
    entries: Vec<(Vec<String>, Intent)>,
}

impl IntentTable {
    pub fn new(entries: Vec<(Vec<String>, Intent)>) -> Self {
        Self { entries }
    }

    /// Phrases understood out of the box.
    pub fn default_spanish() -> Self {
        let phrases = ["qué ves", "que ves", "analiza", "describe"]
            .map(String::from)
            .to_vec();
        Self::new(vec![(phrases, Intent::AnalyzeNow)])
    }

    /// Resolve `utterance` to an intent, if any phrase matches.
    pub fn intent_of(&self, utterance: &str) -> Option<Intent> {
        let normalized = normalize(utterance);
        for (phrases, intent) in &self.entries {
            if phrases.iter().any(|p| normalized.contains(&normalize(p))) {
                return Some(*intent);
            }
        }
        None
    }
}

/// Lowercase and fold Spanish accents for phrase matching.
fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| match c {
            'á' => 'a',
            'é' => 'e',
            'í' => 'i',
            'ó' => 'o',
            'ú' | 'ü' => 'u',
            _ => c,
        })
        .collect()
}

/// Retry policy for listener restarts after transient failures.
#[derive(Clone, Copy, Debug)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Exponential backoff for the given attempt number (1-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay
            .saturating_mul(factor)
            .min(self.max_delay)
    }
}

/// Always-on voice command loop.
///
/// Forwards matched intents over a channel. Transient transcriber errors
/// restart the loop with bounded backoff; permission revocation stops it
/// immediately.
pub struct Listener<T: Transcriber> {
    transcriber: T,
    table: IntentTable,
    policy: RetryPolicy,
}

impl<T: Transcriber> Listener<T> {
    pub fn new(transcriber: T, table: IntentTable) -> Self {
        Self {
            transcriber,
            table,
            policy: RetryPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Run until the channel closes, permission is revoked, or the retry
    /// budget is exhausted.
    pub async fn run(mut self, intents: mpsc::Sender<Intent>) {
        let mut attempts = 0u32;
        loop {
            match self.transcriber.next_final().await {
                Ok(utterance) => {
                    attempts = 0;
                    debug!(%utterance, "heard utterance");
                    if let Some(intent) = self.table.intent_of(&utterance) {
                        info!(?intent, "voice command matched");
                        if intents.send(intent).await.is_err() {
                            return;
                        }
                    }
                }
                Err(ListenerError::PermissionDenied) => {
                    error!("microphone permission denied, not retrying");
                    return;
                }
                Err(ListenerError::Transient(reason)) => {
                    attempts += 1;
                    if attempts >= self.policy.max_attempts {
                        error!(%reason, attempts, "listener retry budget exhausted");
                        return;
                    }
                    let delay = self.policy.delay_for(attempts);
                    warn!(%reason, ?delay, "listener restarting after error");
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}
