use crate::math::{BoundingSphere, AABB};

/// Something the player can bump into.
///
/// Volumes are reported in world space.
pub trait Collider {
    fn bounding_sphere(&self) -> BoundingSphere;

    fn bounding_box(&self) -> AABB;

    /// Whether this object takes part in collision tests at all
    fn detects_collision(&self) -> bool {
        true
    }
}

impl<T: Collider + ?Sized> Collider for &T {
    fn bounding_sphere(&self) -> BoundingSphere {
        (**self).bounding_sphere()
    }

    fn bounding_box(&self) -> AABB {
        (**self).bounding_box()
    }

    fn detects_collision(&self) -> bool {
        (**self).detects_collision()
    }
}

impl Collider for AABB {
    fn bounding_sphere(&self) -> BoundingSphere {
        AABB::bounding_sphere(self)
    }

    fn bounding_box(&self) -> AABB {
        *self
    }
}

impl Collider for BoundingSphere {
    fn bounding_sphere(&self) -> BoundingSphere {
        *self
    }

    fn bounding_box(&self) -> AABB {
        BoundingSphere::bounding_box(self)
    }
}
