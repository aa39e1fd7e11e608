use winit::event::{DeviceEvent, ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};

use crate::traits::{Action, Button, InputEvent};

/// Pixels treated as one wheel notch for touchpad scrolling
const PIXELS_PER_LINE: f64 = 20.0;

/// Translates winit events into [`InputEvent`]s for the camera controllers.
///
/// While the cursor is captured the OS cursor is pinned, so positions come
/// from a virtual cursor fed by raw mouse motion instead of `CursorMoved`.
/// The first real position after capture ends is reported as a warp.
#[derive(Debug, Clone, Default)]
pub struct WinitInput {
    cursor: (f64, f64),
    modifiers: ModifiersState,
    captured: bool,
    resync: bool,
}

impl WinitInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> (f64, f64) {
        self.cursor
    }

    pub fn is_captured(&self) -> bool {
        self.captured
    }

    pub fn set_captured(&mut self, captured: bool) {
        if self.captured && !captured {
            self.resync = true;
        }
        self.captured = captured;
    }

    /// Handle an OS cursor position. Ignored while captured.
    pub fn cursor_moved(&mut self, x: f64, y: f64) -> Option<InputEvent> {
        if self.captured {
            return None;
        }
        self.cursor = (x, y);
        if std::mem::take(&mut self.resync) {
            return Some(InputEvent::MouseWarp { x, y });
        }
        Some(InputEvent::MouseMove { x, y })
    }

    /// Process a window event. Returns `None` for events the controllers do
    /// not care about.
    pub fn translate_window_event(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(code) = event.physical_key else {
                    return None;
                };
                let key = Self::keycode_to_button(code)?;
                Some(InputEvent::Keyboard {
                    key,
                    action: Self::key_action(event.state, event.repeat),
                    mods: self.modifiers,
                })
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = modifiers.state();
                None
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = Self::mouse_button_to_button(*button)?;
                let (x, y) = self.cursor;
                Some(InputEvent::Mouse {
                    button,
                    action: Self::key_action(*state, false),
                    x,
                    y,
                })
            }
            WindowEvent::CursorMoved { position, .. } => self.cursor_moved(position.x, position.y),
            WindowEvent::MouseWheel { delta, .. } => {
                let (x, y) = Self::scroll_lines(*delta);
                Some(InputEvent::Scroll { x, y })
            }
            _ => None,
        }
    }

    /// Process a raw device event. Only relative mouse motion while captured
    /// produces anything.
    pub fn translate_device_event(&mut self, event: &DeviceEvent) -> Option<InputEvent> {
        match event {
            DeviceEvent::MouseMotion { delta } if self.captured => {
                self.cursor.0 += delta.0;
                self.cursor.1 += delta.1;
                Some(InputEvent::MouseMove {
                    x: self.cursor.0,
                    y: self.cursor.1,
                })
            }
            _ => None,
        }
    }

    pub fn key_action(state: ElementState, repeat: bool) -> Action {
        match (state, repeat) {
            (ElementState::Pressed, true) => Action::Repeat,
            (ElementState::Pressed, false) => Action::Press,
            (ElementState::Released, _) => Action::Release,
        }
    }

    pub fn scroll_lines(delta: MouseScrollDelta) -> (f64, f64) {
        match delta {
            MouseScrollDelta::LineDelta(x, y) => (x as f64, y as f64),
            MouseScrollDelta::PixelDelta(p) => (p.x / PIXELS_PER_LINE, p.y / PIXELS_PER_LINE),
        }
    }

    /// Map Winit KeyCode to Button
    pub fn keycode_to_button(keycode: KeyCode) -> Option<Button> {
        match keycode {
            KeyCode::KeyW => Some(Button::KeyW),
            KeyCode::KeyA => Some(Button::KeyA),
            KeyCode::KeyS => Some(Button::KeyS),
            KeyCode::KeyD => Some(Button::KeyD),
            KeyCode::KeyC => Some(Button::KeyC),
            KeyCode::Space => Some(Button::Space),
            KeyCode::ShiftLeft => Some(Button::ShiftLeft),
            KeyCode::ControlLeft => Some(Button::ControlLeft),
            KeyCode::Tab => Some(Button::Tab),
            _ => None,
        }
    }

    /// Map Winit MouseButton to Button
    pub fn mouse_button_to_button(button: MouseButton) -> Option<Button> {
        match button {
            MouseButton::Left => Some(Button::MouseLeft),
            MouseButton::Right => Some(Button::MouseRight),
            MouseButton::Middle => Some(Button::MouseMiddle),
            _ => None,
        }
    }
}
