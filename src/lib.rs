pub mod camera;
pub mod cli;
pub mod config;
pub mod controller;
pub mod core;
pub mod error;
pub mod math;
pub mod scene;
pub mod traits;

pub use camera::{Camera, Projection};
pub use config::Settings;
pub use controller::{CameraController, GameController, MovementStrategy, TrackballController};
pub use error::ConfigError;
pub use scene::Scene;
