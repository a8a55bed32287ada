//! Per-frame player input
//!
//! The core never reads devices. Whatever captures touches or keys hands a
//! [`FrameInput`] to the world every frame.

use plat2d_math::Vec2;
use serde::{Deserialize, Serialize};

/// Analog direction from a joystick, with magnitude at most 1
///
/// `y` grows downward like screen space, so pulling the stick down gives a
/// positive `y`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ControlIntent {
    pub x: f32,
    pub y: f32,
}

impl ControlIntent {
    /// No direction held
    pub const IDLE: Self = Self { x: 0.0, y: 0.0 };

    /// Create an intent, scaling it down onto the unit circle if needed
    pub fn new(x: f32, y: f32) -> Self {
        let v = Vec2::new(x, y);
        let len = v.length();
        if len > 1.0 {
            let v = v / len;
            Self { x: v.x, y: v.y }
        } else {
            Self { x, y }
        }
    }

    /// Intent from a raw stick offset and the stick's full deflection
    pub fn from_stick(offset: Vec2, max_deflection: f32) -> Self {
        if max_deflection <= 0.0 {
            return Self::IDLE;
        }
        Self::new(offset.x / max_deflection, offset.y / max_deflection)
    }
}

/// Discrete buttons
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Buttons {
    /// Jump ("A")
    pub jump: bool,
    /// Run and fire ("B")
    pub action: bool,
}

/// Everything the player reads in one frame
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    pub intent: ControlIntent,
    pub buttons: Buttons,
}

impl FrameInput {
    pub fn new(intent: ControlIntent, buttons: Buttons) -> Self {
        Self { intent, buttons }
    }
}

/// Stick thresholds, as fractions of full deflection
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Pulling down at least this far crouches
    pub crouch_threshold: f32,
    /// Horizontal deflection beyond this moves
    pub move_threshold: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            crouch_threshold: 0.8,
            move_threshold: 0.8,
        }
    }
}

impl InputConfig {
    pub fn wants_crouch(&self, intent: &ControlIntent) -> bool {
        intent.y >= self.crouch_threshold
    }

    /// Horizontal direction to push in, if the stick is past the threshold
    pub fn move_direction(&self, intent: &ControlIntent) -> Option<f32> {
        (intent.x.abs() > self.move_threshold).then(|| intent.x.signum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_is_clamped_to_unit_circle() {
        let intent = ControlIntent::new(3.0, 4.0);
        assert!((intent.x - 0.6).abs() < 0.0001);
        assert!((intent.y - 0.8).abs() < 0.0001);

        let small = ControlIntent::new(0.3, -0.2);
        assert_eq!(small, ControlIntent { x: 0.3, y: -0.2 });
    }

    #[test]
    fn test_from_stick() {
        let intent = ControlIntent::from_stick(Vec2::new(-24.0, 0.0), 48.0);
        assert_eq!(intent, ControlIntent { x: -0.5, y: 0.0 });
        assert_eq!(ControlIntent::from_stick(Vec2::new(5.0, 5.0), 0.0), ControlIntent::IDLE);
    }

    #[test]
    fn test_thresholds() {
        let config = InputConfig::default();
        assert!(config.wants_crouch(&ControlIntent::new(0.0, 0.8)));
        assert!(!config.wants_crouch(&ControlIntent::new(0.0, 0.79)));

        assert_eq!(config.move_direction(&ControlIntent::new(0.9, 0.0)), Some(1.0));
        assert_eq!(config.move_direction(&ControlIntent::new(-0.9, 0.0)), Some(-1.0));
        // Strictly greater than the threshold
        assert_eq!(config.move_direction(&ControlIntent::new(0.8, 0.0)), None);
    }
}
