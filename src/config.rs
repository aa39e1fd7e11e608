// config.rs - Tunables for the camera, controllers and maze
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::camera::Projection;
use crate::controller::MovementStrategy;
use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionKind {
    #[default]
    Perspective,
    Orthographic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub projection: ProjectionKind,
    /// Vertical field of view in degrees
    pub fovy: f32,
    pub near: f32,
    pub far: f32,
    /// Half height of the orthographic box; width follows the aspect ratio
    pub ortho_half_height: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            projection: ProjectionKind::Perspective,
            fovy: 60.0,
            near: 0.1,
            far: 1000.0,
            ortho_half_height: 6.0,
        }
    }
}

impl CameraSettings {
    pub fn projection(&self, aspect: f32) -> Projection {
        match self.projection {
            ProjectionKind::Perspective => Projection::perspective(self.fovy, aspect, self.near, self.far),
            ProjectionKind::Orthographic => {
                let h = self.ortho_half_height;
                Projection::orthographic(-h * aspect, h * aspect, -h, h, self.near, self.far)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackballSettings {
    /// Degrees of rotation per pixel of mouse travel
    pub sensitivity: f32,
    /// World units of pan per pixel of mouse travel
    pub translation_speed: f32,
    pub zoom_speed: f32,
}

impl Default for TrackballSettings {
    fn default() -> Self {
        Self {
            sensitivity: 0.2,
            translation_speed: 0.01,
            zoom_speed: 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Degrees of rotation per pixel of mouse travel
    pub sensitivity: f32,
    /// World units moved per update
    pub move_speed: f32,
    pub zoom_speed: f32,
    /// Half size of the player's collision volume
    pub collision_radius: f32,
    pub strategy: Option<MovementStrategy>,
    /// Multiplier applied to move and zoom speed while sprinting
    pub sprint_factor: f32,
    /// Distance from the goal that counts as reaching it
    pub goal_radius: f32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            sensitivity: 0.05,
            move_speed: 0.02,
            zoom_speed: 0.2,
            collision_radius: 0.2,
            strategy: Some(MovementStrategy::Ortho),
            sprint_factor: 2.0,
            goal_radius: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeSettings {
    pub rows: usize,
    pub cols: usize,
    /// Fixed seed for reproducible layouts; random when absent
    pub seed: Option<u64>,
}

impl Default for MazeSettings {
    fn default() -> Self {
        Self {
            rows: 15,
            cols: 15,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub camera: CameraSettings,
    pub trackball: TrackballSettings,
    pub game: GameSettings,
    pub maze: MazeSettings,
}

impl Settings {
    /// Read settings from a JSON file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let settings: Settings = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let camera = &self.camera;
        positive("camera.fovy", camera.fovy)?;
        positive("camera.near", camera.near)?;
        positive("camera.far", camera.far)?;
        positive("camera.ortho_half_height", camera.ortho_half_height)?;

        self.trackball.validate()?;
        self.game.validate()?;

        let maze = &self.maze;
        if maze.rows < 5 || maze.cols < 5 {
            return Err(ConfigError::InvalidMaze {
                rows: maze.rows,
                cols: maze.cols,
            });
        }
        Ok(())
    }
}

impl TrackballSettings {
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        non_negative("trackball.sensitivity", self.sensitivity)?;
        non_negative("trackball.translation_speed", self.translation_speed)?;
        non_negative("trackball.zoom_speed", self.zoom_speed)
    }
}

impl GameSettings {
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        non_negative("game.sensitivity", self.sensitivity)?;
        non_negative("game.move_speed", self.move_speed)?;
        non_negative("game.zoom_speed", self.zoom_speed)?;
        positive("game.collision_radius", self.collision_radius)?;
        positive("game.sprint_factor", self.sprint_factor)?;
        non_negative("game.goal_radius", self.goal_radius)
    }
}

fn non_negative(name: &'static str, value: f32) -> std::result::Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter { name, value })
    }
}

fn positive(name: &'static str, value: f32) -> std::result::Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter { name, value })
    }
}
