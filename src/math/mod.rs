mod aabb;
mod basis;
mod grid;
mod sphere;

pub use aabb::AABB;
pub use basis::{orthonormalize, rotate_about};
pub use grid::{cell_to_world, world_to_cell};
pub use sphere::{BoundingSphere, SphereContact};
