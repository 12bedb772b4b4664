//! joybridge: mirrors a line-oriented telemetry stream onto a virtual joystick.
//!
//! A log-reading subprocess emits lines that may carry partial joystick state.
//! The bridge parses each line, merges it into the persistent last-known
//! state, scales raw sensor readings into the device range, and commits the
//! result to a virtual uinput joystick. Lines with no recognized fields
//! trigger a replay of the last dispatched state so the device never goes
//! stale between informative lines.

pub mod config;
pub mod device;
pub mod stream;
pub mod telemetry;
