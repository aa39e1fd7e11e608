use std::collections::HashMap;

use crate::traits::{Action, Button, Controller};

/// Button and cursor state shared by every camera controller.
///
/// Keys are recorded only on fresh press/release; repeats are dropped because
/// continuous movement polls this map once per frame instead.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub mouse_left_down: bool,
    pub mouse_right_down: bool,
    pub mouse_middle_down: bool,
    /// Last known cursor position
    pub mouse_x: f64,
    pub mouse_y: f64,
    key_state: HashMap<Button, bool>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track mouse button state. A press also snapshots the cursor position.
    pub fn on_mouse(&mut self, button: Button, action: Action, x: f64, y: f64) {
        let pressed = match action {
            Action::Press => true,
            Action::Release => false,
            Action::Repeat => return,
        };
        if pressed {
            self.mouse_x = x;
            self.mouse_y = y;
        }
        match button {
            Button::MouseLeft => self.mouse_left_down = pressed,
            Button::MouseRight => self.mouse_right_down = pressed,
            Button::MouseMiddle => self.mouse_middle_down = pressed,
            _ => {}
        }
    }

    /// Record a fresh key press or release. Returns false for repeats.
    pub fn on_keyboard(&mut self, key: Button, action: Action) -> bool {
        let pressed = match action {
            Action::Press => true,
            Action::Release => false,
            Action::Repeat => return false,
        };
        self.key_state.insert(key, pressed);
        true
    }

    /// Cursor travel since the last stored position
    pub fn mouse_delta(&self, x: f64, y: f64) -> (f32, f32) {
        ((x - self.mouse_x) as f32, (y - self.mouse_y) as f32)
    }

    pub fn set_mouse_position(&mut self, x: f64, y: f64) {
        self.mouse_x = x;
        self.mouse_y = y;
    }

    /// Forget every held key and button, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        self.key_state.clear();
        self.mouse_left_down = false;
        self.mouse_right_down = false;
        self.mouse_middle_down = false;
    }
}

impl Controller for InputState {
    fn is_down(&self, button: Button) -> bool {
        self.key_state.get(&button).copied().unwrap_or(false)
    }
}
