//! Persistent last-known device state.

use super::parser::{ButtonTag, RawUpdate};

/// The last known value of every tracked field, keyed like [`RawUpdate`] but
/// persistent: values survive across updates until overwritten. Created empty
/// at stream start and lives for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeviceState {
    pub left_horizontal: Option<i32>,
    pub left_vertical: Option<i32>,
    pub right_horizontal: Option<i32>,
    pub right_vertical: Option<i32>,
    pub wheel: Option<i32>,
    pub thumb_wheel: Option<i32>,
    pub button: Option<ButtonTag>,
}

impl DeviceState {
    /// Folds a partial update into this state. Only fields present in the
    /// update are overwritten; everything else keeps its last known value.
    pub fn merge(&mut self, update: &RawUpdate) {
        if let Some(value) = update.left_horizontal {
            self.left_horizontal = Some(value);
        }
        if let Some(value) = update.left_vertical {
            self.left_vertical = Some(value);
        }
        if let Some(value) = update.right_horizontal {
            self.right_horizontal = Some(value);
        }
        if let Some(value) = update.right_vertical {
            self.right_vertical = Some(value);
        }
        if let Some(value) = update.wheel {
            self.wheel = Some(value);
        }
        if let Some(value) = update.thumb_wheel {
            self.thumb_wheel = Some(value);
        }
        if let Some(tag) = &update.button {
            self.button = Some(tag.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_overwrites_only_present_fields() {
        let mut state = DeviceState::default();
        state.merge(&RawUpdate {
            left_horizontal: Some(400),
            left_vertical: Some(500),
            ..RawUpdate::default()
        });
        state.merge(&RawUpdate {
            left_horizontal: Some(600),
            ..RawUpdate::default()
        });

        assert_eq!(state.left_horizontal, Some(600));
        assert_eq!(state.left_vertical, Some(500));
    }

    #[test]
    fn last_write_per_field_wins() {
        let mut state = DeviceState::default();
        for value in [100, 200, 300] {
            state.merge(&RawUpdate {
                wheel: Some(value),
                ..RawUpdate::default()
            });
        }
        assert_eq!(state.wheel, Some(300));
    }

    #[test]
    fn never_observed_fields_stay_absent() {
        let mut state = DeviceState::default();
        state.merge(&RawUpdate {
            button: Some(ButtonTag::Unknown),
            ..RawUpdate::default()
        });

        assert_eq!(state.button, Some(ButtonTag::Unknown));
        assert_eq!(state.right_horizontal, None);
        assert_eq!(state.thumb_wheel, None);
    }
}
