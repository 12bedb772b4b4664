//! Recording sink for adapter and driver tests.

use std::sync::{Arc, Mutex};

use crate::device::sink::{Axis, JoystickSink, SinkError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkCall {
    Axis(Axis, i32),
    Button(u16, bool),
    Commit,
}

/// Sink that records every call. Clones share the same call log, so a test
/// can hand one clone to the adapter and inspect the other.
#[derive(Clone, Default)]
pub struct RecordingSink {
    calls: Arc<Mutex<Vec<SinkCall>>>,
    fail_writes: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose axis and button writes always fail.
    pub fn failing() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_writes: true,
        }
    }

    pub fn calls(&self) -> Vec<SinkCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn commit_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| **call == SinkCall::Commit)
            .count()
    }

    pub fn axis_writes(&self) -> Vec<(Axis, i32)> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter_map(|call| match call {
                SinkCall::Axis(axis, value) => Some((*axis, *value)),
                _ => None,
            })
            .collect()
    }
}

impl JoystickSink for RecordingSink {
    fn set_axis(&mut self, axis: Axis, value: i32) -> Result<(), SinkError> {
        if self.fail_writes {
            return Err(SinkError::Write(std::io::Error::other("sink unavailable")));
        }
        self.calls.lock().unwrap().push(SinkCall::Axis(axis, value));
        Ok(())
    }

    fn set_button(&mut self, button: u16, pressed: bool) -> Result<(), SinkError> {
        if self.fail_writes {
            return Err(SinkError::Write(std::io::Error::other("sink unavailable")));
        }
        self.calls
            .lock()
            .unwrap()
            .push(SinkCall::Button(button, pressed));
        Ok(())
    }

    fn commit(&mut self) -> Result<(), SinkError> {
        self.calls.lock().unwrap().push(SinkCall::Commit);
        Ok(())
    }
}
