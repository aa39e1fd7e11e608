use glam::{Mat4, Vec3};

use super::sphere::BoundingSphere;

/// Axis-Aligned Bounding Box
///
/// `min <= max` componentwise. Overlap tests are inclusive: boxes that share
/// a face count as colliding.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AABB {
    pub min: Vec3,
    pub max: Vec3,
}

impl AABB {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box centered at `center` extending `half_extents` along each axis
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        let half_extents = half_extents.abs();
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Cube enclosing a sphere of `radius` around `center`
    pub fn cube(center: Vec3, radius: f32) -> Self {
        Self::from_center(center, Vec3::splat(radius))
    }

    pub fn union(&self, other: &AABB) -> AABB {
        AABB {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    pub fn translate(&mut self, offset: Vec3) {
        self.min += offset;
        self.max += offset;
    }

    pub fn translated(&self, offset: Vec3) -> AABB {
        AABB {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Inclusive overlap on all three axes
    pub fn intersects(&self, other: &AABB) -> bool {
        (self.min.x <= other.max.x && self.max.x >= other.min.x)
            && (self.min.y <= other.max.y && self.max.y >= other.min.y)
            && (self.min.z <= other.max.z && self.max.z >= other.min.z)
    }

    /// Per-axis penetration depth, `min(maxA, maxB) - max(minA, minB)`.
    /// Non-positive components mean the boxes are apart (or touching) on that axis.
    pub fn overlap(&self, other: &AABB) -> Vec3 {
        self.max.min(other.max) - self.min.max(other.min)
    }

    /// Contact normal for strictly penetrating boxes.
    ///
    /// Returns `None` when any axis has non-positive overlap. Otherwise the
    /// normal lies on the axis of least penetration and points from this box
    /// toward `other`.
    pub fn contact_normal(&self, other: &AABB) -> Option<Vec3> {
        let overlap = self.overlap(other);
        if overlap.x <= 0.0 || overlap.y <= 0.0 || overlap.z <= 0.0 {
            return None;
        }
        Some(self.separation_normal(other))
    }

    /// Axis of least overlap between the two boxes, oriented from this box
    /// toward `other`. Unlike [`AABB::contact_normal`] this does not gate on
    /// penetration, so boxes that only touch still get a push-out axis.
    pub fn separation_normal(&self, other: &AABB) -> Vec3 {
        let overlap = self.overlap(other);
        let toward = other.center() - self.center();
        let sign = |d: f32| if d < 0.0 { -1.0 } else { 1.0 };

        // Ties resolve x, then y, then z.
        if overlap.x <= overlap.y && overlap.x <= overlap.z {
            Vec3::new(sign(toward.x), 0.0, 0.0)
        } else if overlap.y <= overlap.z {
            Vec3::new(0.0, sign(toward.y), 0.0)
        } else {
            Vec3::new(0.0, 0.0, sign(toward.z))
        }
    }

    /// Conservative world-space box of this local box under `model`.
    ///
    /// Half extents go through the absolute rotation/scale block column by
    /// column; the result is centered on the transformed local center. Rotated
    /// boxes are over-approximated.
    pub fn transformed(&self, model: &Mat4) -> AABB {
        let center = model.transform_point3(self.center());
        let half = self.half_extents();
        let extents = model.x_axis.truncate().abs() * half.x
            + model.y_axis.truncate().abs() * half.y
            + model.z_axis.truncate().abs() * half.z;
        AABB::from_center(center, extents)
    }

    /// Smallest sphere around the box corners
    pub fn bounding_sphere(&self) -> BoundingSphere {
        BoundingSphere::new(self.center(), self.half_extents().length())
    }
}
