use async_trait::async_trait;
use speech::{ListenerError, Transcriber};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

/// Treats lines typed on stdin as finalized utterances.
///
/// Stands in for a live speech-recognition engine the way the folder
/// camera stands in for a webcam: the command loop, intent table, and
/// retry policy downstream are exactly the ones a real engine would feed.
pub struct StdinTranscriber {
    lines: Lines<BufReader<Stdin>>,
}

impl StdinTranscriber {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

impl Default for StdinTranscriber {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transcriber for StdinTranscriber {
    async fn next_final(&mut self) -> Result<String, ListenerError> {
        match self.lines.next_line().await {
            Ok(Some(line)) => Ok(line),
            // End of input: behave like a silent microphone.
            Ok(None) => std::future::pending().await,
            Err(e) => Err(ListenerError::Transient(e.to_string())),
        }
    }
}
