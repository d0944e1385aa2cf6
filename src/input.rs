//! Input normalization
//!
//! Folds keyboard state, pointer clicks and a drag-to-steer touch stick into
//! one [`FrameInput`] per frame. DOM event handlers feed this; the simulation
//! only ever sees the normalized result.

use glam::Vec2;

use crate::sim::FrameInput;

/// Drag distance below which the stick reads as centered
pub const STICK_DEADZONE: f32 = 8.0;
/// Drag distance that maps to full deflection
pub const STICK_MAX_THROW: f32 = 80.0;

/// Held direction keys
#[derive(Debug, Clone, Copy, Default)]
struct HeldKeys {
    left: bool,
    right: bool,
    up: bool,
    down: bool,
}

impl HeldKeys {
    fn vector(&self) -> Vec2 {
        let mut v = Vec2::ZERO;
        if self.left {
            v.x -= 1.0;
        }
        if self.right {
            v.x += 1.0;
        }
        if self.up {
            v.y -= 1.0;
        }
        if self.down {
            v.y += 1.0;
        }
        v
    }

    fn set(&mut self, key: &str, down: bool) -> bool {
        let slot = match key {
            "a" | "A" | "ArrowLeft" => &mut self.left,
            "d" | "D" | "ArrowRight" => &mut self.right,
            "w" | "W" | "ArrowUp" => &mut self.up,
            "s" | "S" | "ArrowDown" => &mut self.down,
            _ => return false,
        };
        *slot = down;
        true
    }
}

/// Virtual joystick anchored where the touch began
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchStick {
    pub origin: Vec2,
    pub current: Vec2,
}

impl TouchStick {
    /// Knob offset from the origin, limited to the max throw
    pub fn knob_offset(&self) -> Vec2 {
        (self.current - self.origin).clamp_length_max(STICK_MAX_THROW)
    }

    /// Normalized deflection with the deadzone applied
    pub fn deflection(&self) -> Vec2 {
        let delta = self.current - self.origin;
        if delta.length() < STICK_DEADZONE {
            Vec2::ZERO
        } else {
            delta.clamp_length_max(STICK_MAX_THROW) / STICK_MAX_THROW
        }
    }
}

/// Accumulates raw events between frames
#[derive(Debug, Clone, Default)]
pub struct InputNormalizer {
    keys: HeldKeys,
    stick: Option<TouchStick>,
    dash: bool,
    pause: bool,
    restart: bool,
    activate: bool,
}

impl InputNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keyboard press (`KeyboardEvent.key` values)
    pub fn key_down(&mut self, key: &str) {
        if self.keys.set(key, true) {
            return;
        }
        match key {
            " " | "Shift" => self.dash = true,
            "p" | "P" => self.pause = true,
            "r" | "R" => self.restart = true,
            _ => {}
        }
    }

    pub fn key_up(&mut self, key: &str) {
        self.keys.set(key, false);
    }

    /// Primary pointer press
    pub fn pointer_down(&mut self) {
        self.activate = true;
    }

    /// Double click dashes (handy on trackpads)
    pub fn double_click(&mut self) {
        self.dash = true;
    }

    /// First touch: activates and anchors the stick
    pub fn touch_start(&mut self, pos: Vec2) {
        self.activate = true;
        self.stick = Some(TouchStick {
            origin: pos,
            current: pos,
        });
    }

    pub fn touch_move(&mut self, pos: Vec2) {
        if let Some(stick) = self.stick.as_mut() {
            stick.current = pos;
        }
    }

    pub fn touch_end(&mut self) {
        self.stick = None;
    }

    /// Queue a pause toggle for the next frame. Repeated calls before the
    /// frame is taken still toggle only once.
    pub fn request_pause(&mut self) {
        self.pause = true;
    }

    /// Drop held keys (window blur, restart)
    pub fn release_all(&mut self) {
        self.keys = HeldKeys::default();
        self.stick = None;
    }

    /// Active touch stick, if any (for the overlay)
    pub fn stick(&self) -> Option<TouchStick> {
        self.stick
    }

    /// Current movement intent; the touch stick overrides the keyboard
    pub fn movement(&self) -> Vec2 {
        match self.stick {
            Some(stick) => stick.deflection(),
            None => self.keys.vector(),
        }
    }

    /// Snapshot for one frame, clearing the one-shot actions
    pub fn take_frame_input(&mut self) -> FrameInput {
        let input = FrameInput {
            movement: self.movement(),
            dash: self.dash,
            pause: self.pause,
            restart: self.restart,
            activate: self.activate,
        };
        self.dash = false;
        self.pause = false;
        self.restart = false;
        self.activate = false;
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyboard_vector() {
        let mut input = InputNormalizer::new();
        input.key_down("ArrowLeft");
        input.key_down("w");
        assert_eq!(input.movement(), Vec2::new(-1.0, -1.0));
        input.key_down("d");
        assert_eq!(input.movement(), Vec2::new(0.0, -1.0));
        input.key_up("w");
        input.key_up("ArrowLeft");
        assert_eq!(input.movement(), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_actions_are_one_shot() {
        let mut input = InputNormalizer::new();
        input.key_down(" ");
        input.key_down("P");
        input.key_down("r");
        let frame = input.take_frame_input();
        assert!(frame.dash && frame.pause && frame.restart);
        assert!(!frame.activate);

        let frame = input.take_frame_input();
        assert!(!frame.dash && !frame.pause && !frame.restart);
    }

    #[test]
    fn test_shift_and_double_click_dash() {
        let mut input = InputNormalizer::new();
        input.key_down("Shift");
        assert!(input.take_frame_input().dash);
        input.double_click();
        assert!(input.take_frame_input().dash);
    }

    #[test]
    fn test_touch_stick_deadzone() {
        let mut input = InputNormalizer::new();
        input.touch_start(Vec2::new(100.0, 100.0));
        assert!(input.take_frame_input().activate);

        input.touch_move(Vec2::new(105.0, 103.0));
        assert_eq!(input.movement(), Vec2::ZERO);
    }

    #[test]
    fn test_touch_stick_full_throw() {
        let mut input = InputNormalizer::new();
        input.touch_start(Vec2::new(100.0, 100.0));
        input.touch_move(Vec2::new(400.0, 100.0));
        let m = input.movement();
        assert!((m.x - 1.0).abs() < 1e-6 && m.y.abs() < 1e-6);

        input.touch_move(Vec2::new(140.0, 100.0));
        assert!((input.movement().x - 0.5).abs() < 1e-6);

        let knob = input.stick().unwrap().knob_offset();
        assert_eq!(knob, Vec2::new(40.0, 0.0));
    }

    #[test]
    fn test_touch_overrides_keyboard_until_released() {
        let mut input = InputNormalizer::new();
        input.key_down("a");
        input.touch_start(Vec2::ZERO);
        assert_eq!(input.movement(), Vec2::ZERO);
        input.touch_end();
        assert_eq!(input.movement(), Vec2::new(-1.0, 0.0));
        assert!(input.stick().is_none());
    }

    #[test]
    fn test_request_pause_toggles_once_per_frame() {
        let mut input = InputNormalizer::new();
        input.request_pause();
        input.request_pause();
        assert!(input.take_frame_input().pause);
        assert!(!input.take_frame_input().pause);
    }

    #[test]
    fn test_release_all() {
        let mut input = InputNormalizer::new();
        input.key_down("s");
        input.release_all();
        assert_eq!(input.movement(), Vec2::ZERO);
    }
}
