//! Line source backed by an external telemetry process.

use std::process::Stdio;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

use crate::config::SourceConfig;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to spawn telemetry process: {0}")]
    Spawn(std::io::Error),

    #[error("telemetry process exposes no stdout handle")]
    MissingStdout,

    #[error("failed to read from telemetry stream: {0}")]
    Read(std::io::Error),
}

/// Cancellable source of text lines. May end or error at any time; the owner
/// must call `terminate` on every exit path.
pub struct TelemetrySource {
    child: Option<Child>,
    reader: BufReader<Box<dyn AsyncRead + Send + Unpin>>,
}

impl TelemetrySource {
    /// Launches the configured log-reading process and attaches to its stdout.
    pub fn spawn(config: &SourceConfig) -> Result<Self, SourceError> {
        info!("Spawning telemetry source: {}", config.describe());

        let mut child = Command::new(&config.command)
            .args(&config.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(SourceError::Spawn)?;

        let stdout = child.stdout.take().ok_or(SourceError::MissingStdout)?;

        Ok(Self {
            child: Some(child),
            reader: BufReader::new(Box::new(stdout) as Box<dyn AsyncRead + Send + Unpin>),
        })
    }

    /// Builds a source over any async reader instead of a subprocess.
    pub fn from_reader(reader: impl AsyncRead + Send + Unpin + 'static) -> Self {
        Self {
            child: None,
            reader: BufReader::new(Box::new(reader) as Box<dyn AsyncRead + Send + Unpin>),
        }
    }

    /// Reads the next line, decoding invalid UTF-8 lossily. Returns `Ok(None)`
    /// at end of stream. There is no read timeout; the source may stay silent
    /// indefinitely.
    pub async fn next_line(&mut self) -> Result<Option<String>, SourceError> {
        let mut buf = Vec::new();
        let read = self
            .reader
            .read_until(b'\n', &mut buf)
            .await
            .map_err(SourceError::Read)?;

        if read == 0 {
            return Ok(None);
        }

        let mut line = String::from_utf8_lossy(&buf).into_owned();
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(Some(line))
    }

    /// Terminates the child process, if any. Safe to call more than once.
    pub async fn terminate(&mut self) {
        if let Some(mut child) = self.child.take() {
            debug!("Terminating telemetry source process");
            if let Err(e) = child.kill().await {
                warn!("Failed to terminate telemetry process: {}", e);
            }
        }
    }
}
