//! Stream driver: pulls telemetry lines and keeps the virtual device current.
//!
//! # State Machine
//!
//! ```text
//! Starting ──► Streaming ──► Stopped
//!                  │
//!                  └─ (cancellation, end of stream, read error)
//! ```
//!
//! # Data Flow
//!
//! ```text
//! text line ──► [Parser] ──► RawUpdate ──► [Merge] ──► DeviceState ──► [Sink Adapter]
//!                  │                                        ▲
//!                  └── no update ──► replay dormant snapshot┘
//! ```

use chrono::{DateTime, Local};
use statum::{machine, state};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::config::SourceConfig;
use crate::device::adapter::SinkAdapter;
use crate::stream::source::{SourceError, TelemetrySource};
use crate::telemetry::parser::parse_line;
use crate::telemetry::state::DeviceState;

#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("Source error: {0}")]
    SourceError(#[from] SourceError),

    #[error("Bridge task panicked: {0}")]
    TaskError(String),
}

/// Driver lifecycle states.
#[state]
#[derive(Debug, Clone)]
pub enum BridgeState {
    Starting,
    Streaming,
    Stopped,
}

/// The sequential loop that owns the telemetry source and the device sink.
///
/// There is no internal parallelism: the blocking line read is the only
/// suspension point, and every device commit completes (or fails) before the
/// next line is pulled.
#[machine]
pub struct StreamDriver<S: BridgeState> {
    source: TelemetrySource,
    adapter: SinkAdapter,
    device_state: DeviceState,
    dormant: Option<DeviceState>,
    cancel: CancellationToken,
}

impl StreamDriver<Starting> {
    pub fn create(source: TelemetrySource, adapter: SinkAdapter, cancel: CancellationToken) -> Self {
        Self::new(source, adapter, DeviceState::default(), None, cancel)
    }

    pub fn start(self) -> StreamDriver<Streaming> {
        info!("Stream driver entering streaming state");
        self.transition()
    }
}

impl StreamDriver<Streaming> {
    /// Runs until cancellation, end of stream, or a read error. The source
    /// process is terminated on every exit path, and no device commit happens
    /// after termination.
    pub async fn run(mut self) -> StreamDriver<Stopped> {
        let cancel = self.cancel.clone();
        let mut stats = LoopStats::new();

        loop {
            let pulled = tokio::select! {
                _ = cancel.cancelled() => {
                    info!("Cancellation requested, stopping stream");
                    break;
                }
                line = self.source.next_line() => line,
            };

            match pulled {
                Ok(Some(line)) => {
                    self.handle_line(&line, &mut stats);
                    stats.maybe_log();
                }
                Ok(None) => {
                    info!("Telemetry stream ended");
                    break;
                }
                Err(e) => {
                    error!("Telemetry read failed: {}", e);
                    break;
                }
            }
        }

        self.source.terminate().await;
        info!("Stream driver stopped");
        self.transition()
    }

    fn handle_line(&mut self, line: &str, stats: &mut LoopStats) {
        stats.lines += 1;

        match parse_line(line) {
            Some(update) => {
                self.device_state.merge(&update);
                debug!("Dispatching merged state: {:?}", self.device_state);

                if let Err(e) = self.adapter.apply(&self.device_state) {
                    warn!("Device update failed, dropping frame: {}", e);
                }

                // Recorded whether or not the device accepted the frame.
                self.dormant = Some(self.device_state.clone());
                stats.updates += 1;
            }
            None => {
                if let Some(dormant) = &self.dormant {
                    if let Err(e) = self.adapter.apply(dormant) {
                        warn!("Dormant replay failed, dropping frame: {}", e);
                    }
                    stats.replays += 1;
                }
            }
        }
    }
}

// Throughput counters, reported on a fixed interval.
struct LoopStats {
    lines: u64,
    updates: u64,
    replays: u64,
    last_log: DateTime<Local>,
}

impl LoopStats {
    fn new() -> Self {
        Self {
            lines: 0,
            updates: 0,
            replays: 0,
            last_log: Local::now(),
        }
    }

    fn maybe_log(&mut self) {
        let now = Local::now();
        if now - self.last_log > chrono::Duration::seconds(30) {
            info!(
                "Stream stats: {} lines pulled, {} updates dispatched, {} dormant replays",
                self.lines, self.updates, self.replays
            );
            self.lines = 0;
            self.updates = 0;
            self.replays = 0;
            self.last_log = now;
        }
    }
}

/// Handle for a bridge running in a background task.
///
/// Owns the cancellation token and the task handle; dropping the handle does
/// not stop the bridge, calling [`BridgeHandle::cancel`] does.
pub struct BridgeHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl BridgeHandle {
    /// Spawns the telemetry source and runs the stream driver in a tokio task.
    pub fn spawn(source_config: &SourceConfig, adapter: SinkAdapter) -> Result<Self, DriverError> {
        let source = TelemetrySource::spawn(source_config)?;
        let cancel = CancellationToken::new();
        let driver = StreamDriver::create(source, adapter, cancel.clone());

        let task = tokio::spawn(async move {
            let _stopped = driver.start().run().await;
        });

        info!("Bridge task spawned");
        Ok(Self { cancel, task })
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Requests cooperative shutdown; the driver terminates its source and
    /// stops after the current iteration.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Waits for the bridge task to finish.
    pub async fn join(self) -> Result<(), DriverError> {
        self.task
            .await
            .map_err(|e| DriverError::TaskError(e.to_string()))
    }
}
