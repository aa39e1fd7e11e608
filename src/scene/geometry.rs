use std::cell::Cell;
use std::f32::consts::PI;

use glam::{Mat4, Quat, Vec2, Vec3};

use crate::math::{BoundingSphere, AABB};
use crate::traits::Collider;

/// Half thickness given to planes so that flat geometry still collides
const PLANE_HALF_THICKNESS: f32 = 0.005;

/// Parameters a geometry was built from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// `length` along X, `width` along Z, `height` along Y
    Box { length: f32, width: f32, height: f32 },
    Sphere {
        radius: f32,
        latitude_segments: u32,
        longitude_segments: u32,
    },
    /// Flat on XZ; the texture repeats `segments` times along each side
    Plane { length: f32, width: f32, segments: f32 },
}

/// CPU-side vertex data ready for upload by a renderer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Model-space shape centered on the origin, with its local bounds
#[derive(Debug, Clone)]
pub struct Geometry {
    pub shape: Shape,
    pub mesh: MeshData,
    pub bounding_sphere: BoundingSphere,
    pub bounding_box: AABB,
}

impl Geometry {
    pub fn cuboid(length: f32, width: f32, height: f32) -> Self {
        let half = Vec3::new(length, height, width) * 0.5;
        let (hx, hy, hz) = (half.x, half.y, half.z);

        // Faces do not share vertices so each keeps its own uvs
        let faces: [[Vec3; 4]; 6] = [
            // front
            [
                Vec3::new(-hx, -hy, hz),
                Vec3::new(hx, -hy, hz),
                Vec3::new(hx, hy, hz),
                Vec3::new(-hx, hy, hz),
            ],
            // back
            [
                Vec3::new(-hx, -hy, -hz),
                Vec3::new(hx, -hy, -hz),
                Vec3::new(hx, hy, -hz),
                Vec3::new(-hx, hy, -hz),
            ],
            // left
            [
                Vec3::new(-hx, -hy, -hz),
                Vec3::new(-hx, -hy, hz),
                Vec3::new(-hx, hy, hz),
                Vec3::new(-hx, hy, -hz),
            ],
            // right
            [
                Vec3::new(hx, -hy, -hz),
                Vec3::new(hx, -hy, hz),
                Vec3::new(hx, hy, hz),
                Vec3::new(hx, hy, -hz),
            ],
            // top
            [
                Vec3::new(-hx, hy, -hz),
                Vec3::new(hx, hy, -hz),
                Vec3::new(hx, hy, hz),
                Vec3::new(-hx, hy, hz),
            ],
            // bottom
            [
                Vec3::new(-hx, -hy, -hz),
                Vec3::new(hx, -hy, -hz),
                Vec3::new(hx, -hy, hz),
                Vec3::new(-hx, -hy, hz),
            ],
        ];
        let straight = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0), Vec2::new(0.0, 1.0)];
        let mirrored = [Vec2::new(1.0, 0.0), Vec2::new(0.0, 0.0), Vec2::new(0.0, 1.0), Vec2::new(1.0, 1.0)];
        let flipped = [Vec2::new(0.0, 1.0), Vec2::new(1.0, 1.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 0.0)];
        let face_uvs = [straight, mirrored, straight, mirrored, flipped, straight];

        let mut mesh = MeshData::default();
        for (face, uvs) in faces.iter().zip(face_uvs.iter()) {
            let base = mesh.positions.len() as u32;
            mesh.positions.extend_from_slice(face);
            mesh.uvs.extend_from_slice(uvs);
            mesh.indices
                .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
        }

        Self {
            shape: Shape::Box { length, width, height },
            mesh,
            bounding_sphere: BoundingSphere::new(Vec3::ZERO, half.length()),
            bounding_box: AABB::new(-half, half),
        }
    }

    /// UV sphere. More segments give a smoother surface.
    pub fn sphere(radius: f32, latitude_segments: u32, longitude_segments: u32) -> Self {
        let lat = latitude_segments.max(2);
        let lon = longitude_segments.max(3);

        let mut mesh = MeshData::default();
        for i in 0..=lat {
            let phi = PI * i as f32 / lat as f32;
            for j in 0..=lon {
                let theta = 2.0 * PI * j as f32 / lon as f32;
                mesh.positions.push(Vec3::new(
                    radius * phi.sin() * theta.cos(),
                    radius * phi.cos(),
                    radius * phi.sin() * theta.sin(),
                ));
                mesh.uvs.push(Vec2::new(1.0 - j as f32 / lon as f32, 1.0 - i as f32 / lat as f32));
            }
        }

        for i in 0..lat {
            for j in 0..lon {
                let p1 = i * (lon + 1) + j;
                let p2 = p1 + lon + 1;
                let p3 = p1 + 1;
                let p4 = p2 + 1;
                mesh.indices.extend_from_slice(&[p1, p2, p3, p3, p2, p4]);
            }
        }

        Self {
            shape: Shape::Sphere {
                radius,
                latitude_segments: lat,
                longitude_segments: lon,
            },
            mesh,
            bounding_sphere: BoundingSphere::new(Vec3::ZERO, radius),
            bounding_box: AABB::cube(Vec3::ZERO, radius),
        }
    }

    pub fn plane(length: f32, width: f32, segments: f32) -> Self {
        let hx = length * 0.5;
        let hz = width * 0.5;

        let mesh = MeshData {
            positions: vec![
                Vec3::new(-hx, 0.0, -hz),
                Vec3::new(hx, 0.0, -hz),
                Vec3::new(hx, 0.0, hz),
                Vec3::new(-hx, 0.0, hz),
            ],
            uvs: vec![
                Vec2::new(0.0, segments),
                Vec2::new(segments, segments),
                Vec2::new(segments, 0.0),
                Vec2::new(0.0, 0.0),
            ],
            indices: vec![0, 1, 2, 2, 3, 0],
        };

        Self {
            shape: Shape::Plane { length, width, segments },
            mesh,
            bounding_sphere: BoundingSphere::new(Vec3::ZERO, Vec3::new(hx, 0.0, hz).length()),
            bounding_box: AABB::new(
                Vec3::new(-hx, -PLANE_HALF_THICKNESS, -hz),
                Vec3::new(hx, PLANE_HALF_THICKNESS, hz),
            ),
        }
    }
}

/// Stable handle to a geometry owned by a scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeometryId(pub usize);

/// A placed copy of a [`Geometry`].
///
/// Translation, rotation and scale accumulate separately and compose as
/// `T * R * S`. World center and bounds are derived lazily and cached until
/// the next transform change.
#[derive(Debug, Clone)]
pub struct GeometryInstance {
    pub geometry: GeometryId,
    /// Applied on the left of the model matrix on every [`GeometryInstance::update`]
    pub update_matrix: Mat4,
    pub detect_collision: bool,
    translation: Mat4,
    rotation: Mat4,
    scale: Vec3,
    /// Accumulated per-frame animation
    animation: Mat4,
    local_sphere: BoundingSphere,
    local_box: AABB,
    model: Cell<Option<Mat4>>,
    world_sphere: Cell<Option<BoundingSphere>>,
    world_box: Cell<Option<AABB>>,
}

impl GeometryInstance {
    pub fn new(id: GeometryId, geometry: &Geometry) -> Self {
        Self {
            geometry: id,
            update_matrix: Mat4::IDENTITY,
            detect_collision: true,
            translation: Mat4::IDENTITY,
            rotation: Mat4::IDENTITY,
            scale: Vec3::ONE,
            animation: Mat4::IDENTITY,
            local_sphere: geometry.bounding_sphere,
            local_box: geometry.bounding_box,
            model: Cell::new(None),
            world_sphere: Cell::new(None),
            world_box: Cell::new(None),
        }
    }

    /// Instance with its center placed at `position`
    pub fn at(id: GeometryId, geometry: &Geometry, position: Vec3) -> Self {
        let mut instance = Self::new(id, geometry);
        instance.translate(position);
        instance
    }

    pub fn translate(&mut self, offset: Vec3) -> &mut Self {
        self.translation *= Mat4::from_translation(offset);
        self.invalidate();
        self
    }

    /// Rotate by `angle` degrees around `axis`
    pub fn rotate(&mut self, angle: f32, axis: Vec3) -> &mut Self {
        if let Some(axis) = axis.try_normalize() {
            self.rotation *= Mat4::from_quat(Quat::from_axis_angle(axis, angle.to_radians()));
            self.invalidate();
        }
        self
    }

    pub fn scale(&mut self, factor: Vec3) -> &mut Self {
        self.scale *= factor;
        self.invalidate();
        self
    }

    pub fn with_collision(mut self, detect_collision: bool) -> Self {
        self.detect_collision = detect_collision;
        self
    }

    /// Spin in place around world up by `degrees` every update
    pub fn spin(mut self, degrees: f32) -> Self {
        let center = self.world_center();
        self.update_matrix = Mat4::from_translation(center)
            * Mat4::from_rotation_y(degrees.to_radians())
            * Mat4::from_translation(-center);
        self
    }

    /// Apply one frame of `update_matrix`
    pub fn update(&mut self) {
        if self.update_matrix == Mat4::IDENTITY {
            return;
        }
        self.animation = self.update_matrix * self.animation;
        self.invalidate();
    }

    pub fn model_matrix(&self) -> Mat4 {
        if let Some(model) = self.model.get() {
            return model;
        }
        let model =
            self.animation * self.translation * self.rotation * Mat4::from_scale(self.scale);
        self.model.set(Some(model));
        model
    }

    /// Where the model-space origin ends up
    pub fn world_center(&self) -> Vec3 {
        self.model_matrix().transform_point3(Vec3::ZERO)
    }

    fn invalidate(&mut self) {
        self.model.set(None);
        self.world_sphere.set(None);
        self.world_box.set(None);
    }
}

impl Collider for GeometryInstance {
    fn bounding_sphere(&self) -> BoundingSphere {
        if let Some(sphere) = self.world_sphere.get() {
            return sphere;
        }
        let max_scale = self.scale.abs().max_element();
        let sphere = BoundingSphere::new(self.world_center(), self.local_sphere.radius * max_scale);
        self.world_sphere.set(Some(sphere));
        sphere
    }

    fn bounding_box(&self) -> AABB {
        if let Some(bounds) = self.world_box.get() {
            return bounds;
        }
        let bounds = self.local_box.transformed(&self.model_matrix());
        self.world_box.set(Some(bounds));
        bounds
    }

    fn detects_collision(&self) -> bool {
        self.detect_collision
    }
}
