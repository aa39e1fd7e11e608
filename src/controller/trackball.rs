use glam::Vec3;
use log::debug;

use super::input::InputState;
use crate::camera::Camera;
use crate::config::TrackballSettings;
use crate::error::ConfigError;

/// Orbit, pan and zoom around the world origin with the mouse.
///
/// Left drag orbits: pitch turns around the camera's right axis, yaw around
/// world up, and both carry the camera position with them. Right drag pans
/// along the camera's own right/up. Scrolling zooms the camera.
#[derive(Debug, Clone)]
pub struct TrackballController {
    pub(crate) input: InputState,
    sensitivity: f32,
    translation_speed: f32,
    zoom_speed: f32,
}

impl TrackballController {
    pub fn new(settings: &TrackballSettings) -> Result<Self, ConfigError> {
        settings.validate()?;
        debug!(
            "trackball controller: sensitivity={} translation_speed={} zoom_speed={}",
            settings.sensitivity, settings.translation_speed, settings.zoom_speed
        );
        Ok(Self {
            input: InputState::new(),
            sensitivity: settings.sensitivity,
            translation_speed: settings.translation_speed,
            zoom_speed: settings.zoom_speed,
        })
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn on_mouse_move(&mut self, camera: &mut Camera, x: f64, y: f64) {
        let (dx, dy) = self.input.mouse_delta(x, y);
        if self.input.mouse_left_down {
            self.pitch(camera, -dy * self.sensitivity);
            self.yaw(camera, -dx * self.sensitivity);
        } else if self.input.mouse_right_down {
            let dx = dx * self.translation_speed;
            let dy = dy * self.translation_speed;
            self.translate(camera, -dx, dy);
        }
        self.input.set_mouse_position(x, y);
    }

    pub fn on_mouse_scroll(&mut self, camera: &mut Camera, _x: f64, y: f64) {
        camera.zoom(y as f32 * self.zoom_speed);
    }

    /// Orbit vertically by `angle` degrees
    pub fn pitch(&self, camera: &mut Camera, angle: f32) {
        camera.rotate(camera.right, angle.to_radians(), true);
    }

    /// Orbit horizontally by `angle` degrees
    pub fn yaw(&self, camera: &mut Camera, angle: f32) {
        camera.rotate(Vec3::Y, angle.to_radians(), true);
    }

    fn translate(&self, camera: &mut Camera, x: f32, y: f32) {
        camera.position += camera.right * x + camera.up * y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Projection;
    use crate::traits::{Action, Button};

    fn trackball() -> TrackballController {
        TrackballController::new(&TrackballSettings::default()).unwrap()
    }

    #[test]
    fn move_without_buttons_only_tracks_cursor() {
        let mut controller = trackball();
        let mut camera = Camera::new(Projection::Identity);
        let before = camera.clone();

        controller.on_mouse_move(&mut camera, 50.0, 80.0);

        assert_eq!(camera, before);
        assert_eq!((controller.input().mouse_x, controller.input().mouse_y), (50.0, 80.0));
    }

    #[test]
    fn yaw_orbits_position_around_origin() {
        let controller = trackball();
        let mut camera = Camera::new(Projection::Identity);
        let radius = camera.position.length();

        controller.yaw(&mut camera, 90.0);

        assert!((camera.position.length() - radius).abs() < 1e-5);
        assert!(camera.position.abs_diff_eq(Vec3::new(5.0, 0.0, 0.0), 1e-5), "{}", camera.position);
        // Still looking at the origin
        assert!(camera.forward().abs_diff_eq(Vec3::NEG_X, 1e-5));
    }

    #[test]
    fn right_drag_pans_along_camera_axes() {
        let mut controller = trackball();
        let mut camera = Camera::new(Projection::Identity);
        controller.input.on_mouse(Button::MouseRight, Action::Press, 100.0, 100.0);

        controller.on_mouse_move(&mut camera, 110.0, 100.0);

        // Dragging right moves the camera left
        assert!(camera.position.abs_diff_eq(Vec3::new(-0.1, 0.0, 5.0), 1e-5), "{}", camera.position);
    }

    #[test]
    fn negative_settings_rejected() {
        let settings = TrackballSettings {
            zoom_speed: -0.5,
            ..TrackballSettings::default()
        };
        assert!(matches!(
            TrackballController::new(&settings),
            Err(ConfigError::InvalidParameter { name: "trackball.zoom_speed", .. })
        ));
    }
}
