use glam::Vec3;

use super::aabb::AABB;

/// Centers closer than this have no usable contact direction
const COINCIDENT_EPSILON: f32 = 1e-6;

/// Bounding sphere used as the cheap first collision phase
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

/// Result of a sphere-sphere test that found an overlap.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SphereContact {
    /// Unit vector from the first center toward the second. `None` when the
    /// centers coincide.
    pub normal: Option<Vec3>,
}

impl BoundingSphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
        }
    }

    pub fn translate(&mut self, offset: Vec3) {
        self.center += offset;
    }

    pub fn translated(&self, offset: Vec3) -> BoundingSphere {
        BoundingSphere {
            center: self.center + offset,
            radius: self.radius,
        }
    }

    /// True iff the distance between centers is at most the sum of radii
    pub fn intersects(&self, other: &BoundingSphere) -> bool {
        self.center.distance(other.center) <= self.radius + other.radius
    }

    pub fn contact(&self, other: &BoundingSphere) -> Option<SphereContact> {
        let delta = other.center - self.center;
        if delta.length() > self.radius + other.radius {
            return None;
        }
        let normal = (delta.length() > COINCIDENT_EPSILON).then(|| delta.normalize());
        Some(SphereContact { normal })
    }

    pub fn bounding_box(&self) -> AABB {
        AABB::cube(self.center, self.radius)
    }
}
