use glam::Vec3;
use serde::{Deserialize, Serialize};

/// How WASD/Space/Shift factors turn into a world-space direction.
///
/// The returned vector is neither normalized nor guaranteed non-zero; the
/// caller normalizes and applies speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MovementStrategy {
    /// Unconstrained flight along the camera's own axes
    #[default]
    Free,
    /// Forward/strafe stay horizontal, vertical input moves along world up
    Ortho,
    /// Horizontal movement only; vertical input is ignored
    Planar,
}

impl MovementStrategy {
    pub fn compute_direction(
        self,
        up: Vec3,
        right: Vec3,
        front_factor: f32,
        right_factor: f32,
        up_factor: f32,
    ) -> Vec3 {
        let front = up.cross(right);
        match self {
            MovementStrategy::Free => right * right_factor + up * up_factor + front * front_factor,
            MovementStrategy::Ortho => {
                right * right_factor + Vec3::Y * up_factor + horizontal(front) * front_factor
            }
            MovementStrategy::Planar => right * right_factor + horizontal(front) * front_factor,
        }
    }
}

/// Drop the vertical component and renormalize. Looking straight up or down
/// leaves nothing, which yields zero.
fn horizontal(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z).normalize_or_zero()
}
