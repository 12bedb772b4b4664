//! Sink trait for the virtual input device.

use thiserror::Error;

/// Absolute axes exposed by the virtual joystick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    /// X-rotation; carries the inverted right-horizontal reading.
    Rx,
    /// Y-rotation; carries the inverted right-vertical reading.
    Ry,
    /// Secondary wheel axis.
    Z,
    /// Combined zoom axis.
    Rz,
}

/// Number of discrete buttons the adapter tracks (ids 1 through 4).
pub const TRACKED_BUTTONS: u16 = 4;

/// Errors raised by a device backend.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to create virtual device: {0}")]
    Creation(String),

    #[error("device write failed: {0}")]
    Write(#[from] std::io::Error),

    #[error("unsupported button id: {0}")]
    UnknownButton(u16),
}

/// A stateful device sink: absolute axes and discrete buttons staged
/// individually, then pushed out in one atomic `commit`.
pub trait JoystickSink: Send {
    fn set_axis(&mut self, axis: Axis, value: i32) -> Result<(), SinkError>;

    fn set_button(&mut self, button: u16, pressed: bool) -> Result<(), SinkError>;

    /// Publishes everything staged since the last commit as one device update.
    fn commit(&mut self) -> Result<(), SinkError>;
}
