//! Linux uinput backend for the virtual joystick.

use evdev::uinput::{VirtualDevice, VirtualDeviceBuilder};
use evdev::{AbsInfo, AbsoluteAxisType, AttributeSet, EventType, InputEvent, Key, UinputAbsSetup};
use tracing::{debug, info};

use crate::device::sink::{Axis, JoystickSink, SinkError};
use crate::telemetry::scale::AXIS_MAX;

/// Virtual joystick backed by `/dev/uinput`.
///
/// Axis and button writes are buffered and flushed by `commit` as a single
/// batch, which the kernel syn-reports as one atomic device update.
pub struct UinputJoystick {
    device: VirtualDevice,
    pending: Vec<InputEvent>,
}

impl UinputJoystick {
    pub fn create(name: &str) -> Result<Self, SinkError> {
        let device = build_device(name).map_err(|e| SinkError::Creation(e.to_string()))?;
        info!("Created virtual joystick device: {}", name);

        Ok(Self {
            device,
            pending: Vec::new(),
        })
    }

    fn axis_code(axis: Axis) -> AbsoluteAxisType {
        match axis {
            Axis::X => AbsoluteAxisType::ABS_X,
            Axis::Y => AbsoluteAxisType::ABS_Y,
            Axis::Rx => AbsoluteAxisType::ABS_RX,
            Axis::Ry => AbsoluteAxisType::ABS_RY,
            Axis::Z => AbsoluteAxisType::ABS_Z,
            Axis::Rz => AbsoluteAxisType::ABS_RZ,
        }
    }

    fn button_key(button: u16) -> Option<Key> {
        match button {
            1 => Some(Key::BTN_TRIGGER),
            2 => Some(Key::BTN_THUMB),
            3 => Some(Key::BTN_THUMB2),
            4 => Some(Key::BTN_TOP),
            _ => None,
        }
    }
}

impl JoystickSink for UinputJoystick {
    fn set_axis(&mut self, axis: Axis, value: i32) -> Result<(), SinkError> {
        self.pending
            .push(InputEvent::new(EventType::ABSOLUTE, Self::axis_code(axis).0, value));
        Ok(())
    }

    fn set_button(&mut self, button: u16, pressed: bool) -> Result<(), SinkError> {
        let key = Self::button_key(button).ok_or(SinkError::UnknownButton(button))?;
        self.pending
            .push(InputEvent::new(EventType::KEY, key.0, i32::from(pressed)));
        Ok(())
    }

    fn commit(&mut self) -> Result<(), SinkError> {
        let events = std::mem::take(&mut self.pending);
        if events.is_empty() {
            return Ok(());
        }
        debug!("Committing {} device events", events.len());
        self.device.emit(&events)?;
        Ok(())
    }
}

fn build_device(name: &str) -> std::io::Result<VirtualDevice> {
    let abs = AbsInfo::new(0, 0, AXIS_MAX, 0, 0, 0);

    let mut keys = AttributeSet::<Key>::new();
    for key in [Key::BTN_TRIGGER, Key::BTN_THUMB, Key::BTN_THUMB2, Key::BTN_TOP] {
        keys.insert(key);
    }

    VirtualDeviceBuilder::new()?
        .name(name)
        .with_keys(&keys)?
        .with_absolute_axis(&UinputAbsSetup::new(AbsoluteAxisType::ABS_X, abs))?
        .with_absolute_axis(&UinputAbsSetup::new(AbsoluteAxisType::ABS_Y, abs))?
        .with_absolute_axis(&UinputAbsSetup::new(AbsoluteAxisType::ABS_RX, abs))?
        .with_absolute_axis(&UinputAbsSetup::new(AbsoluteAxisType::ABS_RY, abs))?
        .with_absolute_axis(&UinputAbsSetup::new(AbsoluteAxisType::ABS_Z, abs))?
        .with_absolute_axis(&UinputAbsSetup::new(AbsoluteAxisType::ABS_RZ, abs))?
        .build()
}
