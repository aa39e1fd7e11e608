mod game;
mod input;
mod movement;
mod trackball;

pub use game::{deflect, GameController, GameControllerBuilder, Goal, PITCH_LIMIT};
pub use input::InputState;
pub use movement::MovementStrategy;
pub use trackball::TrackballController;

use glam::Vec3;
use winit::keyboard::ModifiersState;

use crate::camera::Camera;
use crate::traits::{Action, Button, Collider, InputEvent};

/// The camera controllers a scene can drive its camera with.
#[derive(Debug, Clone)]
pub enum CameraController {
    Trackball(TrackballController),
    Game(GameController),
}

impl CameraController {
    pub fn name(&self) -> &'static str {
        match self {
            CameraController::Trackball(_) => "trackball",
            CameraController::Game(_) => "game",
        }
    }

    pub fn input(&self) -> &InputState {
        match self {
            CameraController::Trackball(c) => c.input(),
            CameraController::Game(c) => c.input(),
        }
    }

    fn input_mut(&mut self) -> &mut InputState {
        match self {
            CameraController::Trackball(c) => &mut c.input,
            CameraController::Game(c) => &mut c.input,
        }
    }

    pub fn as_game(&self) -> Option<&GameController> {
        match self {
            CameraController::Game(c) => Some(c),
            CameraController::Trackball(_) => None,
        }
    }

    pub fn as_game_mut(&mut self) -> Option<&mut GameController> {
        match self {
            CameraController::Game(c) => Some(c),
            CameraController::Trackball(_) => None,
        }
    }

    /// Forget held keys and buttons, e.g. after the window loses focus
    pub fn release_all(&mut self) {
        match self {
            CameraController::Trackball(c) => c.input.release_all(),
            CameraController::Game(c) => c.release_all(),
        }
    }

    /// Last cursor position the next mouse move is measured from
    pub fn mouse_position(&self) -> (f64, f64) {
        let input = self.input();
        (input.mouse_x, input.mouse_y)
    }

    /// Move the stored cursor without turning the camera
    pub fn sync_mouse(&mut self, x: f64, y: f64) {
        self.input_mut().set_mouse_position(x, y);
    }

    pub fn on_mouse(&mut self, button: Button, action: Action, x: f64, y: f64) {
        self.input_mut().on_mouse(button, action, x, y);
    }

    pub fn on_mouse_move(&mut self, camera: &mut Camera, x: f64, y: f64) {
        match self {
            CameraController::Trackball(c) => c.on_mouse_move(camera, x, y),
            CameraController::Game(c) => c.on_mouse_move(camera, x, y),
        }
    }

    pub fn on_keyboard(&mut self, key: Button, action: Action, mods: ModifiersState) {
        match self {
            CameraController::Trackball(c) => {
                c.input.on_keyboard(key, action);
            }
            CameraController::Game(c) => c.on_keyboard(key, action, mods),
        }
    }

    pub fn on_mouse_scroll(&mut self, camera: &mut Camera, x: f64, y: f64) {
        match self {
            CameraController::Trackball(c) => c.on_mouse_scroll(camera, x, y),
            CameraController::Game(c) => c.on_mouse_scroll(camera, x, y),
        }
    }

    /// Per-frame step. Only the game controller moves on its own.
    pub fn update<C: Collider>(&mut self, camera: &mut Camera, obstacles: &[C]) -> Option<Vec3> {
        match self {
            CameraController::Trackball(_) => None,
            CameraController::Game(c) => c.update(camera, obstacles),
        }
    }

    /// Route one input event to the matching callback
    pub fn handle_event(&mut self, camera: &mut Camera, event: &InputEvent) {
        match *event {
            InputEvent::Mouse { button, action, x, y } => self.on_mouse(button, action, x, y),
            InputEvent::MouseMove { x, y } => self.on_mouse_move(camera, x, y),
            InputEvent::MouseWarp { x, y } => self.sync_mouse(x, y),
            InputEvent::Keyboard { key, action, mods } => self.on_keyboard(key, action, mods),
            InputEvent::Scroll { x, y } => self.on_mouse_scroll(camera, x, y),
        }
    }
}

impl From<TrackballController> for CameraController {
    fn from(controller: TrackballController) -> Self {
        CameraController::Trackball(controller)
    }
}

impl From<GameController> for CameraController {
    fn from(controller: GameController) -> Self {
        CameraController::Game(controller)
    }
}
