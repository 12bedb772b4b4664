//! Extracts partial joystick updates from raw telemetry lines.
//!
//! Each recognized field is matched independently, so a single line may carry
//! zero, one, or several fields. Lines with no recognized field are noise and
//! yield no update.

use regex::Regex;
use std::fmt::{self, Display};
use std::sync::OnceLock;

/// Symbolic button tag carried by a telemetry line.
///
/// The stream emits an open set of tokens; the known subset is modeled
/// explicitly and everything else is preserved verbatim in `Unmapped`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonTag {
    Unknown,
    RightCustom,
    LeftCustom,
    ZoomIn,
    ZoomOut,
    Unmapped(String),
}

impl ButtonTag {
    pub fn from_token(token: &str) -> Self {
        match token {
            "UNKNOWN" => ButtonTag::Unknown,
            "RIGHT_CUSTOM" => ButtonTag::RightCustom,
            "LEFT_CUSTOM" => ButtonTag::LeftCustom,
            "ZOOM_IN" => ButtonTag::ZoomIn,
            "ZOOM_OUT" => ButtonTag::ZoomOut,
            other => ButtonTag::Unmapped(other.to_string()),
        }
    }

    /// Whether this tag steers the combined zoom axis.
    pub fn is_zoom(&self) -> bool {
        matches!(self, ButtonTag::ZoomIn | ButtonTag::ZoomOut)
    }
}

impl Display for ButtonTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ButtonTag::Unknown => write!(f, "UNKNOWN"),
            ButtonTag::RightCustom => write!(f, "RIGHT_CUSTOM"),
            ButtonTag::LeftCustom => write!(f, "LEFT_CUSTOM"),
            ButtonTag::ZoomIn => write!(f, "ZOOM_IN"),
            ButtonTag::ZoomOut => write!(f, "ZOOM_OUT"),
            ButtonTag::Unmapped(token) => write!(f, "{}", token),
        }
    }
}

/// Partial snapshot extracted from a single line. Absent fields were simply
/// not mentioned on the line; they carry no "reset to zero" meaning.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawUpdate {
    pub left_horizontal: Option<i32>,
    pub left_vertical: Option<i32>,
    pub right_horizontal: Option<i32>,
    pub right_vertical: Option<i32>,
    pub wheel: Option<i32>,
    pub thumb_wheel: Option<i32>,
    pub button: Option<ButtonTag>,
}

impl RawUpdate {
    pub fn is_empty(&self) -> bool {
        self.left_horizontal.is_none()
            && self.left_vertical.is_none()
            && self.right_horizontal.is_none()
            && self.right_vertical.is_none()
            && self.wheel.is_none()
            && self.thumb_wheel.is_none()
            && self.button.is_none()
    }
}

struct FieldMatchers {
    left_horizontal: Regex,
    left_vertical: Regex,
    right_horizontal: Regex,
    right_vertical: Regex,
    wheel: Regex,
    thumb_wheel: Regex,
    button: Regex,
}

fn matchers() -> &'static FieldMatchers {
    static MATCHERS: OnceLock<FieldMatchers> = OnceLock::new();
    MATCHERS.get_or_init(|| FieldMatchers {
        left_horizontal: Regex::new(r"leftHorizontalValue:\s*(\d+)").expect("valid pattern"),
        left_vertical: Regex::new(r"leftVerticalValue:\s*(\d+)").expect("valid pattern"),
        right_horizontal: Regex::new(r"rightHorizontalValue:\s*(\d+)").expect("valid pattern"),
        right_vertical: Regex::new(r"rightVerticalValue:\s*(\d+)").expect("valid pattern"),
        wheel: Regex::new(r"wheelValue1:\s*(\d+)").expect("valid pattern"),
        thumb_wheel: Regex::new(r"thumbWheelValue:\s*(\d+)").expect("valid pattern"),
        button: Regex::new(r"buttonType:\s*(\w+)").expect("valid pattern"),
    })
}

// A value too large for i32 is treated the same as no match at all.
fn numeric_field(matcher: &Regex, line: &str) -> Option<i32> {
    matcher
        .captures(line)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Parses one raw line into a partial update.
///
/// Returns `None` for lines with no recognized field. Malformed lines are not
/// an error; they are indistinguishable from unrelated log output.
pub fn parse_line(line: &str) -> Option<RawUpdate> {
    let m = matchers();

    let update = RawUpdate {
        left_horizontal: numeric_field(&m.left_horizontal, line),
        left_vertical: numeric_field(&m.left_vertical, line),
        right_horizontal: numeric_field(&m.right_horizontal, line),
        right_vertical: numeric_field(&m.right_vertical, line),
        wheel: numeric_field(&m.wheel, line),
        thumb_wheel: numeric_field(&m.thumb_wheel, line),
        button: m
            .button
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|token| ButtonTag::from_token(token.as_str())),
    };

    if update.is_empty() {
        None
    } else {
        Some(update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_field_line() {
        let line = "05-12 14:03:22.123 I/HidRemote( 812): leftHorizontalValue: 512";
        let update = parse_line(line).expect("update");
        assert_eq!(update.left_horizontal, Some(512));
        assert_eq!(update.left_vertical, None);
        assert_eq!(update.button, None);
    }

    #[test]
    fn several_fields_on_one_line() {
        let line = "leftHorizontalValue: 359 leftVerticalValue: 1689 wheelValue1: 1000";
        let update = parse_line(line).expect("update");
        assert_eq!(update.left_horizontal, Some(359));
        assert_eq!(update.left_vertical, Some(1689));
        assert_eq!(update.wheel, Some(1000));
        assert_eq!(update.right_horizontal, None);
    }

    #[test]
    fn noise_line_yields_nothing() {
        assert_eq!(parse_line("05-12 14:03:22.200 D/WifiService: scan finished"), None);
        assert_eq!(parse_line(""), None);
    }

    #[test]
    fn malformed_value_is_ignored() {
        // No digits after the colon, so the field simply does not match.
        assert_eq!(parse_line("leftHorizontalValue: abc"), None);
    }

    #[test]
    fn overflowing_value_is_ignored() {
        assert_eq!(parse_line("leftHorizontalValue: 99999999999999999999"), None);
    }

    #[test]
    fn known_button_tokens() {
        let update = parse_line("buttonType: LEFT_CUSTOM").expect("update");
        assert_eq!(update.button, Some(ButtonTag::LeftCustom));

        let update = parse_line("buttonType: ZOOM_OUT").expect("update");
        assert_eq!(update.button, Some(ButtonTag::ZoomOut));
    }

    #[test]
    fn unrecognized_button_token_is_preserved() {
        let update = parse_line("buttonType: SIDE_PADDLE").expect("update");
        assert_eq!(update.button, Some(ButtonTag::Unmapped("SIDE_PADDLE".to_string())));
        assert_eq!(update.button.unwrap().to_string(), "SIDE_PADDLE");
    }

    #[test]
    fn thumb_wheel_with_zoom_tag() {
        let update = parse_line("thumbWheelValue: 100 buttonType: ZOOM_IN").expect("update");
        assert_eq!(update.thumb_wheel, Some(100));
        assert_eq!(update.button, Some(ButtonTag::ZoomIn));
    }
}
