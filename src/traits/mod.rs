pub mod collider;
pub mod controller;

pub use collider::*;
pub use controller::*;
