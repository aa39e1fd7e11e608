use glam::Vec3;
use log::{debug, info};
use winit::keyboard::ModifiersState;

use super::maze::Maze;
use super::Scene;
use crate::camera::Camera;
use crate::math::cell_to_world;
use crate::traits::{Action, Button, InputEvent};

/// Drives a game controller along a list of waypoints by synthesizing the
/// same mouse and keyboard events a player would produce.
#[derive(Debug, Clone)]
pub struct Autopilot {
    waypoints: Vec<Vec3>,
    next: usize,
    /// Horizontal distance at which a waypoint counts as passed
    tolerance: f32,
    cursor: (f64, f64),
    walking: bool,
}

/// Result of a headless run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outcome {
    pub frames: usize,
    pub reached_goal: bool,
    pub position: Vec3,
}

impl Autopilot {
    pub fn new(waypoints: Vec<Vec3>, tolerance: f32) -> Self {
        Self {
            waypoints,
            next: 0,
            tolerance,
            cursor: (0.0, 0.0),
            walking: false,
        }
    }

    /// Follow the maze solution at eye `height`; `None` if the maze has none
    pub fn through_maze(maze: &Maze, height: f32, tolerance: f32) -> Option<Self> {
        let path = maze.solve()?;
        let waypoints = path
            .into_iter()
            .map(|(row, col)| cell_to_world(row, col, height))
            .collect();
        Some(Self::new(waypoints, tolerance))
    }

    pub fn is_finished(&self) -> bool {
        self.next >= self.waypoints.len()
    }

    pub fn remaining(&self) -> usize {
        self.waypoints.len().saturating_sub(self.next)
    }

    /// Events to deliver before the next controller update: a mouse move that
    /// turns the camera toward the current waypoint and forward key changes.
    /// `sensitivity` must match the controller's degrees per pixel.
    pub fn steer(&mut self, camera: &Camera, sensitivity: f32) -> Vec<InputEvent> {
        let mut events = Vec::new();

        while let Some(&target) = self.waypoints.get(self.next) {
            if horizontal(target - camera.position).length() > self.tolerance {
                break;
            }
            self.next += 1;
            debug!("waypoint passed, {} left", self.remaining());
        }

        let Some(&target) = self.waypoints.get(self.next) else {
            if self.walking {
                self.walking = false;
                events.push(key(Action::Release));
            }
            return events;
        };

        let forward = horizontal(camera.forward());
        let wanted = horizontal(target - camera.position);
        if sensitivity > 0.0 && forward != Vec3::ZERO && wanted != Vec3::ZERO {
            let angle = Vec3::Y.dot(forward.cross(wanted)).atan2(forward.dot(wanted));
            // The controller yaws by -dx * sensitivity
            self.cursor.0 -= (angle.to_degrees() / sensitivity) as f64;
            events.push(InputEvent::MouseMove {
                x: self.cursor.0,
                y: self.cursor.1,
            });
        }

        if !self.walking {
            self.walking = true;
            events.push(key(Action::Press));
        }
        events
    }

    /// Walk `scene` for at most `max_frames` updates or until the goal latches.
    pub fn run(&mut self, scene: &mut Scene, max_frames: usize) -> Outcome {
        let sensitivity = scene.settings().game.sensitivity;
        let mut frames = 0;

        while frames < max_frames && !scene.reached_goal() {
            let events = self.steer(&scene.camera, sensitivity);
            for event in &events {
                scene.handle_event(event);
            }
            if self.is_finished() {
                break;
            }
            scene.update();
            frames += 1;
        }

        let outcome = Outcome {
            frames,
            reached_goal: scene.reached_goal(),
            position: scene.camera.position,
        };
        info!(
            "autopilot stopped after {} frames at {} (goal reached: {})",
            outcome.frames, outcome.position, outcome.reached_goal
        );
        outcome
    }
}

fn horizontal(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

fn key(action: Action) -> InputEvent {
    InputEvent::Keyboard {
        key: Button::KeyW,
        action,
        mods: ModifiersState::empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Projection;

    fn camera_at(position: Vec3) -> Camera {
        Camera::with_pose(position, Vec3::Y, Vec3::X, Projection::Identity)
    }

    #[test]
    fn test_first_steer_presses_forward_once() {
        let mut pilot = Autopilot::new(vec![Vec3::new(0.0, 0.0, -3.0)], 0.02);
        let camera = camera_at(Vec3::ZERO);

        let events = pilot.steer(&camera, 0.1);
        // Already facing the target: no turn needed beyond a zero-length move
        assert!(events.contains(&key(Action::Press)));
        let again = pilot.steer(&camera, 0.1);
        assert!(!again.contains(&key(Action::Press)));
    }

    #[test]
    fn test_turn_direction_matches_yaw() {
        // Target straight to the right (+X); the camera faces -Z
        let mut pilot = Autopilot::new(vec![Vec3::new(2.0, 0.0, 0.0)], 0.02);
        let camera = camera_at(Vec3::ZERO);

        let events = pilot.steer(&camera, 0.5);
        let Some(InputEvent::MouseMove { x, .. }) = events.first().copied() else {
            panic!("expected a mouse move, got {events:?}");
        };
        // Turning right is a -90 degree yaw, i.e. +180 px at 0.5 deg/px
        assert!((x - 180.0).abs() < 1e-3, "{x}");
    }

    #[test]
    fn test_release_after_last_waypoint() {
        let mut pilot = Autopilot::new(vec![Vec3::new(0.0, 0.0, -1.0)], 0.05);
        let mut camera = camera_at(Vec3::ZERO);
        pilot.steer(&camera, 0.1);

        camera.position = Vec3::new(0.0, 0.0, -0.99);
        let events = pilot.steer(&camera, 0.1);
        assert!(pilot.is_finished());
        assert_eq!(events, vec![key(Action::Release)]);
    }
}
