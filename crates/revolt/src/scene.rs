//! Game objects and the per-frame scene update.

use std::sync::Arc;

use glam::{Mat4, Vec3, Vec4};

use crate::mesh::Mesh;

/// Flat surface colour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// sRGB-encoded RGBA in `[0, 1]`, alpha straight.
    pub color: Vec4,
}

impl Default for Material {
    fn default() -> Self {
        Self { color: Vec4::ONE }
    }
}

impl Material {
    #[must_use]
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    #[must_use]
    pub fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            color: Vec4::new(r, g, b, a),
        }
    }

    #[must_use]
    pub fn is_translucent(&self) -> bool {
        self.color.w < 1.0
    }
}

/// A placed instance of a mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct GameObject {
    pub mesh: Arc<Mesh>,
    pub material: Material,
    pub position: Vec3,
    /// Euler angles in degrees, applied X then Y then Z.
    pub rotation_degrees: Vec3,
    pub scale: Vec3,
    /// Animation frame passed to [`submit`](crate::submit).
    pub frame: i32,
}

impl GameObject {
    #[must_use]
    pub fn new(mesh: Arc<Mesh>) -> Self {
        Self {
            mesh,
            material: Material::default(),
            position: Vec3::ZERO,
            rotation_degrees: Vec3::ZERO,
            scale: Vec3::ONE,
            frame: 0,
        }
    }

    #[must_use]
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, rotation_degrees: Vec3) -> Self {
        self.rotation_degrees = rotation_degrees;
        self
    }

    #[must_use]
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Model matrix: translate, then rotate X, Y, Z, then scale.
    #[must_use]
    pub fn transform(&self) -> Mat4 {
        let rotation = self.rotation_degrees;
        Mat4::from_translation(self.position)
            * Mat4::from_rotation_x(rotation.x.to_radians())
            * Mat4::from_rotation_y(rotation.y.to_radians())
            * Mat4::from_rotation_z(rotation.z.to_radians())
            * Mat4::from_scale(self.scale)
    }
}

/// Stable handle to an object in a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u64);

/// Per-scene animation rates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneSettings {
    /// Spin about Y in degrees per second.
    pub rotation_speed: f32,
    /// Legacy model animation rate. Zero or less stops animation.
    pub animation_fps: f32,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            rotation_speed: 180.0,
            animation_fps: 10.0,
        }
    }
}

/// An ordered collection of game objects.
#[derive(Debug, Default)]
pub struct Scene {
    pub settings: SceneSettings,
    objects: Vec<(ObjectId, GameObject)>,
    next_id: u64,
    elapsed: f32,
    frame_timer: f32,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_settings(settings: SceneSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Add an object and return its handle.
    pub fn spawn(&mut self, object: GameObject) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.objects.push((id, object));
        id
    }

    /// Remove an object, keeping the order of the rest.
    pub fn remove(&mut self, id: ObjectId) -> Option<GameObject> {
        let index = self.objects.iter().position(|(other, _)| *other == id)?;
        Some(self.objects.remove(index).1)
    }

    #[must_use]
    pub fn get(&self, id: ObjectId) -> Option<&GameObject> {
        self.objects
            .iter()
            .find(|(other, _)| *other == id)
            .map(|(_, object)| object)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut GameObject> {
        self.objects
            .iter_mut()
            .find(|(other, _)| *other == id)
            .map(|(_, object)| object)
    }

    /// Objects in spawn order.
    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &GameObject)> {
        self.objects.iter().map(|(id, object)| (*id, object))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Seconds accumulated by [`Scene::update`].
    #[must_use]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Advance the scene clock by `dt` seconds.
    ///
    /// Every object's Y rotation becomes `elapsed * rotation_speed`, wrapped
    /// to `[0, 360)`; X and Z are left alone. Legacy models step their
    /// animation frame at `animation_fps`, wrapping at the frame count.
    pub fn update(&mut self, dt: f32) {
        self.elapsed += dt;
        let yaw = (self.elapsed * self.settings.rotation_speed).rem_euclid(360.0);

        let steps = self.animation_steps(dt);
        for (_, object) in &mut self.objects {
            object.rotation_degrees.y = yaw;

            let frame_count = object.mesh.frame_count();
            if steps > 0 && object.mesh.as_model().is_some() && frame_count > 0 {
                let count = frame_count as i64;
                let next = (i64::from(object.frame.max(0)) + steps).rem_euclid(count);
                object.frame = next as i32;
            }
        }
    }

    /// Whole animation frames elapsed since the last step.
    fn animation_steps(&mut self, dt: f32) -> i64 {
        let fps = self.settings.animation_fps;
        if fps <= 0.0 {
            return 0;
        }
        self.frame_timer += dt * fps;
        let steps = self.frame_timer.floor();
        self.frame_timer -= steps;
        steps as i64
    }
}
