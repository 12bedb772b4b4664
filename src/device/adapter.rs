//! Applies merged telemetry state to the virtual joystick.

use tracing::warn;

use crate::device::sink::{Axis, JoystickSink, SinkError, TRACKED_BUTTONS};
use crate::telemetry::parser::ButtonTag;
use crate::telemetry::scale::{invert, scale, zoom_axis, ScalingRange};
use crate::telemetry::state::DeviceState;

/// Owns the device sink and translates a merged state snapshot into axis and
/// button writes, finished by one atomic commit.
pub struct SinkAdapter {
    sink: Box<dyn JoystickSink>,
    stick_range: ScalingRange,
    wheel_range: ScalingRange,
}

impl SinkAdapter {
    pub fn new(sink: Box<dyn JoystickSink>, stick_range: ScalingRange, wheel_range: ScalingRange) -> Self {
        Self {
            sink,
            stick_range,
            wheel_range,
        }
    }

    /// Writes every field that is set in `state` to the device, skipping
    /// fields never yet observed, then commits.
    ///
    /// A failing sink call aborts the current frame; the caller drops the
    /// frame and keeps streaming.
    pub fn apply(&mut self, state: &DeviceState) -> Result<(), SinkError> {
        if let Some(value) = state.left_horizontal {
            self.sink.set_axis(Axis::X, scale(value, self.stick_range))?;
        }
        if let Some(value) = state.left_vertical {
            self.sink.set_axis(Axis::Y, scale(value, self.stick_range))?;
        }
        // The rotational axes run reversed on the physical stick.
        if let Some(value) = state.right_horizontal {
            self.sink
                .set_axis(Axis::Rx, scale(invert(value, self.stick_range), self.stick_range))?;
        }
        if let Some(value) = state.right_vertical {
            self.sink
                .set_axis(Axis::Ry, scale(invert(value, self.stick_range), self.stick_range))?;
        }
        if let Some(value) = state.wheel {
            self.sink.set_axis(Axis::Z, scale(value, self.wheel_range))?;
        }

        match (&state.button, state.thumb_wheel) {
            (Some(tag), Some(magnitude)) if tag.is_zoom() => {
                let combined = if *tag == ButtonTag::ZoomIn {
                    magnitude
                } else {
                    -magnitude
                };
                self.sink.set_axis(Axis::Rz, zoom_axis(combined))?;
            }
            (Some(tag), _) => {
                for button in 1..=TRACKED_BUTTONS {
                    self.sink.set_button(button, false)?;
                }
                match map_button(tag) {
                    Some(button) => self.sink.set_button(button, true)?,
                    None => warn!("Unmapped button event: {}", tag),
                }
            }
            _ => {}
        }

        self.sink.commit()
    }
}

// Fixed tag-to-button table. Zoom tags land here only when no thumb-wheel
// value is present, and stay unmapped like any other unlisted token.
fn map_button(tag: &ButtonTag) -> Option<u16> {
    match tag {
        ButtonTag::Unknown | ButtonTag::RightCustom => Some(1),
        ButtonTag::LeftCustom => Some(2),
        _ => None,
    }
}
