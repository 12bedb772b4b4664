//! Telemetry subprocess source and the stream driver that orchestrates the bridge.

pub mod driver;
pub mod source;

pub use driver::{BridgeHandle, DriverError, StreamDriver};
pub use source::{SourceError, TelemetrySource};
