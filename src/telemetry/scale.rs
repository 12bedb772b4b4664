//! Maps raw sensor readings into the output device's axis range.

use serde::{Deserialize, Serialize};

/// Upper bound of every absolute output axis.
pub const AXIS_MAX: i32 = 32768;

/// Raw-unit bounds of one sensor. Values outside are clamped before
/// normalization. Must satisfy `min < max`; config validation enforces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ScalingRange {
    pub min: i32,
    pub max: i32,
}

impl ScalingRange {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }
}

/// Scales a raw reading into `[0, AXIS_MAX]`: clamp into the range, normalize,
/// multiply out and truncate toward zero.
pub fn scale(value: i32, range: ScalingRange) -> i32 {
    let clamped = value.clamp(range.min, range.max);
    let normalized = (clamped - range.min) as f64 / (range.max - range.min) as f64;
    (normalized * AXIS_MAX as f64) as i32
}

/// Mirrors a raw reading inside its range, for axes whose physical sense is
/// reversed relative to the output device. Involution.
pub fn invert(value: i32, range: ScalingRange) -> i32 {
    range.min + range.max - value
}

/// Maps a signed zoom value (thumb-wheel magnitude, negated for zoom-out) to
/// the zoom axis. The input ranges over `[-255, 255]` and the formula is not
/// clamped; the device never reports magnitudes outside that range.
pub fn zoom_axis(combined: i32) -> i32 {
    ((combined + 255) as f64 / 510.0 * AXIS_MAX as f64) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    const STICK: ScalingRange = ScalingRange::new(359, 1689);
    const WHEEL: ScalingRange = ScalingRange::new(724, 1324);

    #[test]
    fn range_endpoints_hit_axis_bounds() {
        assert_eq!(scale(359, STICK), 0);
        assert_eq!(scale(1689, STICK), AXIS_MAX);
        assert_eq!(scale(724, WHEEL), 0);
        assert_eq!(scale(1324, WHEEL), AXIS_MAX);
    }

    #[test]
    fn out_of_range_values_clamp() {
        assert_eq!(scale(0, STICK), 0);
        assert_eq!(scale(-500, STICK), 0);
        assert_eq!(scale(5000, STICK), AXIS_MAX);
    }

    #[test]
    fn scaling_is_monotonic() {
        let samples = [359, 400, 700, 1024, 1400, 1689];
        let outputs: Vec<i32> = samples.iter().map(|&v| scale(v, STICK)).collect();
        for pair in outputs.windows(2) {
            assert!(pair[0] <= pair[1], "scale not monotonic: {:?}", outputs);
        }
    }

    #[test]
    fn scaling_truncates_toward_zero() {
        // (1000 - 359) / 1330 * 32768 = 15793.46..., so the output is 15793.
        assert_eq!(scale(1000, STICK), 15793);
    }

    #[test]
    fn invert_is_an_involution() {
        for value in [0, 359, 812, 1689, 4000] {
            assert_eq!(invert(invert(value, STICK), STICK), value);
        }
    }

    #[test]
    fn invert_swaps_range_endpoints() {
        assert_eq!(invert(359, STICK), 1689);
        assert_eq!(invert(1689, STICK), 359);
    }

    #[test]
    fn zoom_axis_combination() {
        // ZOOM_OUT with magnitude 100: ((-100 + 255) / 510) * 32768 = 9958.9...
        assert_eq!(zoom_axis(-100), 9958);
        assert_eq!(zoom_axis(255), AXIS_MAX);
        assert_eq!(zoom_axis(-255), 0);
        assert_eq!(zoom_axis(0), AXIS_MAX / 2);
    }
}
