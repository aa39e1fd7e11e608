use glam::{Mat4, Vec3};

use crate::math::{orthonormalize, rotate_about};

/// How the camera maps view space to clip space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// No projection; zoom is ignored
    Identity,
    Perspective {
        /// Vertical field of view in degrees
        fovy: f32,
        aspect: f32,
        near: f32,
        far: f32,
    },
    Orthographic {
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
        /// Zoom exponent; the box is scaled by `2^scale`
        scale: f32,
    },
}

impl Projection {
    pub fn perspective(fovy: f32, aspect: f32, near: f32, far: f32) -> Self {
        Projection::Perspective {
            fovy,
            aspect,
            near,
            far,
        }
    }

    pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        Projection::Orthographic {
            left,
            right,
            bottom,
            top,
            near,
            far,
            scale: 0.0,
        }
    }

    pub fn matrix(&self) -> Mat4 {
        match *self {
            Projection::Identity => Mat4::IDENTITY,
            Projection::Perspective {
                fovy,
                aspect,
                near,
                far,
            } => Mat4::perspective_rh_gl(fovy.to_radians(), aspect, near, far),
            Projection::Orthographic {
                left,
                right,
                bottom,
                top,
                near,
                far,
                scale,
            } => {
                // Depth range stays unscaled
                let factor = 2f32.powf(scale);
                Mat4::orthographic_rh_gl(
                    left * factor,
                    right * factor,
                    bottom * factor,
                    top * factor,
                    near,
                    far,
                )
            }
        }
    }

    /// Update the aspect ratio after a resize. Only perspective projections track it.
    pub fn set_aspect(&mut self, new_aspect: f32) {
        if let Projection::Perspective { aspect, .. } = self {
            *aspect = new_aspect;
        }
    }
}

/// A camera defined by a position and a local `up`/`right` basis.
///
/// Forward is always derived as `up × right`. With the default basis the
/// camera looks down -Z.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub up: Vec3,
    pub right: Vec3,
    pub projection: Projection,
}

impl Camera {
    pub fn new(projection: Projection) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            up: Vec3::Y,
            right: Vec3::X,
            projection,
        }
    }

    pub fn with_pose(position: Vec3, up: Vec3, right: Vec3, projection: Projection) -> Self {
        Self {
            position,
            up,
            right,
            projection,
        }
    }

    pub fn forward(&self) -> Vec3 {
        self.up.cross(self.right)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward(), self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection.matrix()
    }

    /// Perspective cameras dolly along forward by `delta_scale`; orthographic
    /// cameras shrink the box as `delta_scale` grows.
    pub fn zoom(&mut self, delta_scale: f32) {
        match &mut self.projection {
            Projection::Identity => {}
            Projection::Perspective { .. } => {
                let front = self.forward().normalize_or_zero();
                self.position += front * delta_scale;
            }
            Projection::Orthographic { scale, .. } => {
                *scale -= delta_scale;
            }
        }
    }

    /// Rotate the basis by `angle` radians around `axis`. With `orbit` the
    /// position turns around the world origin as well.
    pub fn rotate(&mut self, axis: Vec3, angle: f32, orbit: bool) {
        self.up = rotate_about(self.up, axis, angle);
        self.right = rotate_about(self.right, axis, angle);
        if orbit {
            self.position = rotate_about(self.position, axis, angle);
        }
        self.orthonormalize();
    }

    /// Remove drift accumulated by incremental rotation.
    pub fn orthonormalize(&mut self) {
        let (up, right) = orthonormalize(self.up, self.right);
        self.up = up;
        self.right = right;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Projection::perspective(60.0, 4.0 / 3.0, 0.1, 1000.0))
    }
}
