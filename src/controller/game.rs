use glam::Vec3;
use log::{debug, info, trace};
use winit::keyboard::ModifiersState;

use super::input::InputState;
use super::movement::MovementStrategy;
use crate::camera::Camera;
use crate::config::GameSettings;
use crate::error::ConfigError;
use crate::math::{BoundingSphere, AABB};
use crate::traits::{Action, Button, Collider, Controller};

/// Accumulated pitch never leaves ±PITCH_LIMIT degrees
pub const PITCH_LIMIT: f32 = 89.0;

/// Deflected strides shorter than this are dropped
const STRIDE_EPSILON: f32 = 1e-5;

/// A point the player is trying to reach
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Goal {
    pub position: Vec3,
    pub radius: f32,
}

/// Remove the component of `stride` along `normal` and restore the original
/// length. Returns `None` when almost nothing is left to move along.
pub fn deflect(stride: Vec3, normal: Vec3) -> Option<Vec3> {
    let projected = stride - normal * stride.dot(normal);
    if projected.length() < STRIDE_EPSILON {
        return None;
    }
    Some(projected.normalize() * stride.length())
}

/// First-person controller: mouse-look, WASD movement and collision against
/// a list of obstacles.
#[derive(Debug, Clone)]
pub struct GameController {
    pub(crate) input: InputState,
    sensitivity: f32,
    move_speed: f32,
    zoom_speed: f32,
    sprint_factor: f32,
    strategy: MovementStrategy,
    pitch_angle: f32,
    bounding_sphere: BoundingSphere,
    bounding_box: AABB,
    goal: Option<Goal>,
    reached_goal: bool,
    cursor_captured: bool,
    sprinting: bool,
}

/// Builds a [`GameController`] from settings, with optional overrides.
#[derive(Debug, Clone)]
pub struct GameControllerBuilder {
    settings: GameSettings,
    goal: Option<Vec3>,
    cursor_captured: bool,
}

impl GameControllerBuilder {
    pub fn strategy(mut self, strategy: MovementStrategy) -> Self {
        self.settings.strategy = Some(strategy);
        self
    }

    pub fn move_speed(mut self, move_speed: f32) -> Self {
        self.settings.move_speed = move_speed;
        self
    }

    pub fn collision_radius(mut self, radius: f32) -> Self {
        self.settings.collision_radius = radius;
        self
    }

    /// Goal point; reaching it within the configured goal radius ends movement
    pub fn goal(mut self, position: Vec3) -> Self {
        self.goal = Some(position);
        self
    }

    pub fn cursor_captured(mut self, captured: bool) -> Self {
        self.cursor_captured = captured;
        self
    }

    /// Validate the settings and place the collision volume on `camera`.
    pub fn build(self, camera: &Camera) -> Result<GameController, ConfigError> {
        let settings = self.settings;
        settings.validate()?;
        let strategy = settings.strategy.ok_or(ConfigError::MissingStrategy)?;
        let goal = self.goal.map(|position| Goal {
            position,
            radius: settings.goal_radius,
        });

        debug!(
            "game controller: strategy={:?} move_speed={} radius={} goal={:?}",
            strategy, settings.move_speed, settings.collision_radius, goal
        );

        let mut controller = GameController {
            input: InputState::new(),
            sensitivity: settings.sensitivity,
            move_speed: settings.move_speed,
            zoom_speed: settings.zoom_speed,
            sprint_factor: settings.sprint_factor,
            strategy,
            pitch_angle: 0.0,
            bounding_sphere: BoundingSphere::new(camera.position, settings.collision_radius),
            bounding_box: AABB::cube(camera.position, settings.collision_radius),
            goal,
            reached_goal: false,
            cursor_captured: self.cursor_captured,
            sprinting: false,
        };
        controller.set_bounding_space(camera, settings.collision_radius);
        Ok(controller)
    }
}

impl GameController {
    pub fn builder(settings: GameSettings) -> GameControllerBuilder {
        GameControllerBuilder {
            settings,
            goal: None,
            cursor_captured: true,
        }
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn strategy(&self) -> MovementStrategy {
        self.strategy
    }

    pub fn set_strategy(&mut self, strategy: MovementStrategy) {
        self.strategy = strategy;
    }

    pub fn move_speed(&self) -> f32 {
        self.move_speed
    }

    pub fn zoom_speed(&self) -> f32 {
        self.zoom_speed
    }

    /// Tracked pitch in degrees, within ±[`PITCH_LIMIT`]
    pub fn pitch_angle(&self) -> f32 {
        self.pitch_angle
    }

    pub fn bounding_sphere(&self) -> BoundingSphere {
        self.bounding_sphere
    }

    pub fn bounding_box(&self) -> AABB {
        self.bounding_box
    }

    pub fn goal(&self) -> Option<Goal> {
        self.goal
    }

    pub fn reached_goal(&self) -> bool {
        self.reached_goal
    }

    pub fn cursor_captured(&self) -> bool {
        self.cursor_captured
    }

    pub fn is_sprinting(&self) -> bool {
        self.sprinting
    }

    /// Re-center the player's collision volume on the camera.
    pub fn set_bounding_space(&mut self, camera: &Camera, radius: f32) {
        self.bounding_sphere = BoundingSphere::new(camera.position, radius);
        self.bounding_box = AABB::cube(camera.position, radius);
    }

    pub fn on_mouse_move(&mut self, camera: &mut Camera, x: f64, y: f64) {
        let (dx, dy) = self.input.mouse_delta(x, y);
        self.pitch(camera, -dy * self.sensitivity);
        self.yaw(camera, -dx * self.sensitivity);
        self.input.set_mouse_position(x, y);
    }

    pub fn on_keyboard(&mut self, key: Button, action: Action, _mods: ModifiersState) {
        if !self.input.on_keyboard(key, action) {
            return;
        }
        match (key, action) {
            (Button::KeyC, Action::Press) => {
                self.cursor_captured = !self.cursor_captured;
                debug!("cursor captured: {}", self.cursor_captured);
            }
            (Button::ControlLeft, Action::Press) if !self.sprinting => {
                self.sprinting = true;
                self.move_speed *= self.sprint_factor;
                self.zoom_speed *= self.sprint_factor;
                debug!("sprint on, move_speed={}", self.move_speed);
            }
            (Button::ControlLeft, Action::Release) => self.end_sprint(),
            _ => {}
        }
    }

    /// Forget held keys and buttons and drop out of sprint, since the Control
    /// release may never arrive.
    pub fn release_all(&mut self) {
        self.input.release_all();
        self.end_sprint();
    }

    fn end_sprint(&mut self) {
        if !self.sprinting {
            return;
        }
        self.sprinting = false;
        self.move_speed /= self.sprint_factor;
        self.zoom_speed /= self.sprint_factor;
        debug!("sprint off, move_speed={}", self.move_speed);
    }

    pub fn on_mouse_scroll(&mut self, camera: &mut Camera, _x: f64, y: f64) {
        camera.zoom(y as f32 * self.zoom_speed);
    }

    /// Look up (positive) or down by `angle` degrees around the camera's right
    /// axis. A step that would leave ±[`PITCH_LIMIT`] is rejected outright and
    /// only the tracked angle is clamped.
    pub fn pitch(&mut self, camera: &mut Camera, angle: f32) {
        self.pitch_angle += angle;
        if self.pitch_angle.abs() > PITCH_LIMIT {
            self.pitch_angle = self.pitch_angle.clamp(-PITCH_LIMIT, PITCH_LIMIT);
            trace!("pitch clamped at {}", self.pitch_angle);
            return;
        }
        camera.rotate(camera.right, angle.to_radians(), false);
    }

    /// Turn left (positive) or right by `angle` degrees around world up, so
    /// the camera never rolls.
    pub fn yaw(&mut self, camera: &mut Camera, angle: f32) {
        camera.rotate(Vec3::Y, angle.to_radians(), false);
    }

    /// Move once according to the held keys. Returns the stride that was
    /// applied, or `None` when the player stayed put.
    pub fn update<C: Collider>(&mut self, camera: &mut Camera, obstacles: &[C]) -> Option<Vec3> {
        if self.reached_goal {
            return None;
        }

        let direction = self.strategy.compute_direction(
            camera.up,
            camera.right,
            self.input.axis(Button::KeyW, Button::KeyS),
            self.input.axis(Button::KeyD, Button::KeyA),
            self.input.axis(Button::Space, Button::ShiftLeft),
        );
        let direction = direction.try_normalize()?;
        let mut stride = direction * self.move_speed;

        // Each hit deflects the stride the next obstacle sees.
        for (index, obstacle) in obstacles.iter().enumerate() {
            if !obstacle.detects_collision() {
                continue;
            }
            let Some(normal) = self.check_collision(obstacle, stride) else {
                continue;
            };
            trace!("collision with obstacle {} normal={}", index, normal);
            match deflect(stride, normal) {
                Some(deflected) => stride = deflected,
                None => {
                    trace!("stride absorbed by obstacle {}", index);
                    return None;
                }
            }
        }

        camera.position += stride;
        self.bounding_sphere.translate(stride);
        self.bounding_box.translate(stride);

        if let Some(goal) = self.goal {
            if camera.position.distance(goal.position) <= goal.radius {
                self.reached_goal = true;
                info!("goal reached at {}", camera.position);
            }
        }

        Some(stride)
    }

    /// Two-phase test of the player volume moved by `stride` against
    /// `obstacle`: spheres first, then boxes. Returns the push-out axis.
    fn check_collision<C: Collider>(&self, obstacle: &C, stride: Vec3) -> Option<Vec3> {
        let sphere = self.bounding_sphere.translated(stride);
        if !sphere.intersects(&obstacle.bounding_sphere()) {
            return None;
        }

        let player = self.bounding_box.translated(stride);
        let other = obstacle.bounding_box();
        if !player.intersects(&other) {
            return None;
        }
        Some(player.separation_normal(&other))
    }
}
