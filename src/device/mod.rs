//! Virtual joystick output boundary.

pub mod adapter;
#[cfg(test)]
pub mod mock;
pub mod sink;
pub mod uinput;

pub use adapter::SinkAdapter;
pub use sink::{Axis, JoystickSink, SinkError, TRACKED_BUTTONS};
pub use uinput::UinputJoystick;
