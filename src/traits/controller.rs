use winit::keyboard::ModifiersState;

/// Input button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    KeyW,
    KeyA,
    KeyS,
    KeyD,
    KeyC,
    Space,
    ShiftLeft,
    ControlLeft,
    Tab,
    MouseLeft,
    MouseRight,
    MouseMiddle,
}

/// What happened to a button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Press,
    Release,
    /// Auto-repeat while a key stays held
    Repeat,
}

/// A single input event as delivered by the windowing layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Mouse {
        button: Button,
        action: Action,
        x: f64,
        y: f64,
    },
    MouseMove {
        x: f64,
        y: f64,
    },
    /// The cursor jumped without the user moving it, e.g. when capture ends.
    /// Controllers take the new position but do not turn.
    MouseWarp {
        x: f64,
        y: f64,
    },
    Keyboard {
        key: Button,
        action: Action,
        mods: ModifiersState,
    },
    Scroll {
        x: f64,
        y: f64,
    },
}

/// Controller - handles button input states
pub trait Controller {
    /// Check if button is currently down
    fn is_down(&self, button: Button) -> bool;

    /// Signed input factor: 1 when only `positive` is held, -1 when only
    /// `negative` is held, 0 otherwise
    fn axis(&self, positive: Button, negative: Button) -> f32 {
        match (self.is_down(positive), self.is_down(negative)) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_button_hash_duplicates() {
        let mut set = HashSet::new();
        set.insert(Button::KeyW);
        set.insert(Button::KeyW);

        assert_eq!(set.len(), 1);
    }

    // Test mock controller implementation
    struct MockController {
        pressed: Vec<Button>,
    }

    impl Controller for MockController {
        fn is_down(&self, button: Button) -> bool {
            self.pressed.contains(&button)
        }
    }

    #[test]
    fn test_controller_axis() {
        let controller = MockController {
            pressed: vec![Button::KeyW, Button::KeyA, Button::KeyD],
        };

        assert_eq!(controller.axis(Button::KeyW, Button::KeyS), 1.0);
        assert_eq!(controller.axis(Button::KeyS, Button::KeyW), -1.0);
        assert_eq!(controller.axis(Button::KeyD, Button::KeyA), 0.0);
        assert_eq!(controller.axis(Button::Space, Button::ShiftLeft), 0.0);
    }
}
