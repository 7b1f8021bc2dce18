//! JSON scene files and the built-in demo scene.
//!
//! The loader is permissive: missing fields fall back to defaults, and
//! objects that cannot be built are logged and skipped. Only a scene file
//! that cannot be read or parsed at all is an error.

use std::f32::consts::FRAC_PI_3;
use std::fs;
use std::path::{Path, PathBuf};

use glam::{Vec3, Vec4};
use serde::Deserialize;

use crate::cache::ResourceCache;
use crate::camera::Camera;
use crate::error::SceneError;
use crate::mesh::Mesh;
use crate::scene::{GameObject, Material, Scene};

/// Extra X rotation applied to every torus so it stands upright.
pub const TORUS_TILT_DEGREES: f32 = 90.0;

/// A scene together with the camera it is viewed through.
#[derive(Debug)]
pub struct LoadedScene {
    pub scene: Scene,
    pub camera: Camera,
}

#[derive(Debug, Deserialize)]
struct SceneFile {
    #[serde(default)]
    camera: CameraDesc,
    /// Kept untyped so one malformed object does not reject the file.
    #[serde(default)]
    objects: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct CameraDesc {
    fov: f32,
    aspect: f32,
    near: f32,
    far: f32,
    position: [f32; 3],
    look_at: [f32; 3],
}

impl Default for CameraDesc {
    fn default() -> Self {
        let camera = demo_camera();
        Self {
            fov: camera.fov_y,
            aspect: camera.aspect,
            near: camera.near,
            far: camera.far,
            position: camera.eye.to_array(),
            look_at: camera.target.to_array(),
        }
    }
}

impl CameraDesc {
    fn build(&self) -> Camera {
        let mut camera = Camera::default();
        camera.set_perspective(self.fov, self.aspect, self.near, self.far);
        camera.look_at(Vec3::from(self.position), Vec3::from(self.look_at));
        camera
    }
}

#[derive(Debug, Deserialize)]
struct ObjectDesc {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    parameters: Parameters,
    #[serde(default)]
    material: MaterialDesc,
    #[serde(default)]
    position: [f32; 3],
    #[serde(default)]
    rotation: [f32; 3],
    #[serde(default = "unit_scale")]
    scale: [f32; 3],
}

fn unit_scale() -> [f32; 3] {
    [1.0; 3]
}

/// Union of the parameters of every object type.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Parameters {
    base: Option<f32>,
    height: Option<f32>,
    size: Option<f32>,
    major_radius: Option<f32>,
    minor_radius: Option<f32>,
    major_segments: Option<u32>,
    minor_segments: Option<u32>,
    path: Option<PathBuf>,
    frame: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct MaterialDesc {
    /// RGB or RGBA; a missing alpha is opaque.
    color: Vec<f32>,
}

impl Default for MaterialDesc {
    fn default() -> Self {
        Self {
            color: vec![1.0; 4],
        }
    }
}

impl MaterialDesc {
    fn build(&self) -> Material {
        let channel = |i: usize, default: f32| self.color.get(i).copied().unwrap_or(default);
        Material {
            color: Vec4::new(
                channel(0, 1.0),
                channel(1, 1.0),
                channel(2, 1.0),
                channel(3, 1.0),
            ),
        }
    }
}

/// Read and build the scene stored at `path`.
///
/// Model paths inside the file are resolved relative to the file's
/// directory.
pub fn load_scene(path: impl AsRef<Path>, cache: &mut ResourceCache) -> Result<LoadedScene, SceneError> {
    let path = path.as_ref();
    tracing::info!("Loading scene from {}", path.display());

    let text = fs::read_to_string(path).map_err(|source| SceneError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    parse_scene(&text, base_dir, cache).map_err(|source| SceneError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Build a scene from JSON text. Relative model paths resolve against
/// `base_dir`.
pub fn parse_scene(
    json: &str,
    base_dir: &Path,
    cache: &mut ResourceCache,
) -> Result<LoadedScene, serde_json::Error> {
    let file: SceneFile = serde_json::from_str(json)?;

    let mut scene = Scene::new();
    for (index, value) in file.objects.iter().enumerate() {
        let desc = match ObjectDesc::deserialize(value) {
            Ok(desc) => desc,
            Err(e) => {
                tracing::warn!("Skipping object {index}: {e}");
                continue;
            }
        };
        if let Some(object) = build_object(&desc, base_dir, cache) {
            scene.spawn(object);
        }
    }

    tracing::info!(
        "Scene loaded: {} of {} objects",
        scene.len(),
        file.objects.len()
    );

    Ok(LoadedScene {
        scene,
        camera: file.camera.build(),
    })
}

/// Load `path`, falling back to [`demo_scene`] if the file is unusable.
pub fn load_or_demo(path: impl AsRef<Path>, cache: &mut ResourceCache) -> LoadedScene {
    match load_scene(path, cache) {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::error!("{e}; using demo scene");
            demo_scene(cache)
        }
    }
}

fn build_object(desc: &ObjectDesc, base_dir: &Path, cache: &mut ResourceCache) -> Option<GameObject> {
    let params = &desc.parameters;
    let mut rotation = Vec3::from(desc.rotation);
    let mut frame = 0;

    let mesh = match desc.kind.as_str() {
        "Pyramid" => cache.mesh(Mesh::Pyramid {
            base: params.base.unwrap_or(1.0),
            height: params.height.unwrap_or(1.5),
        }),
        "Cube" => cache.mesh(Mesh::Cube {
            size: params.size.unwrap_or(0.8),
        }),
        "Torus" => {
            rotation.x += TORUS_TILT_DEGREES;
            cache.mesh(Mesh::Torus {
                major_radius: params.major_radius.unwrap_or(1.0),
                minor_radius: params.minor_radius.unwrap_or(0.3),
                major_segments: params.major_segments.unwrap_or(16),
                minor_segments: params.minor_segments.unwrap_or(8),
            })
        }
        "Model" => {
            let Some(path) = &params.path else {
                tracing::warn!("Model object without a path, skipping");
                return None;
            };
            let path = base_dir.join(path);
            match cache.model(&path) {
                Ok(mesh) => {
                    frame = params.frame.unwrap_or(0);
                    mesh
                }
                Err(e) => {
                    tracing::warn!("Skipping model {}: {e}", path.display());
                    return None;
                }
            }
        }
        other => {
            tracing::warn!("Unknown object type {other:?}, skipping");
            return None;
        }
    };

    let material = desc.material.build();
    tracing::debug!(
        "Loaded {} at {:?}, color {:?}",
        desc.kind,
        desc.position,
        material.color
    );

    let mut object = GameObject::new(mesh)
        .with_material(material)
        .with_position(Vec3::from(desc.position))
        .with_rotation(rotation)
        .with_scale(Vec3::from(desc.scale));
    object.frame = frame;
    Some(object)
}

fn demo_camera() -> Camera {
    let mut camera = Camera::default();
    camera.set_perspective(FRAC_PI_3, 16.0 / 9.0, 0.1, 100.0);
    camera.look_at(Vec3::new(0.0, 0.0, 2.0), Vec3::ZERO);
    camera
}

/// Red pyramid, translucent green cube and an upright yellow torus.
pub fn demo_scene(cache: &mut ResourceCache) -> LoadedScene {
    let mut scene = Scene::new();

    scene.spawn(
        GameObject::new(cache.mesh(Mesh::Pyramid {
            base: 1.0,
            height: 1.5,
        }))
        .with_material(Material::rgb(1.0, 0.0, 0.0))
        .with_position(Vec3::new(-1.5, 0.0, 0.0)),
    );
    scene.spawn(
        GameObject::new(cache.mesh(Mesh::Cube { size: 0.8 }))
            .with_material(Material::rgba(0.0, 1.0, 0.0, 0.7)),
    );
    scene.spawn(
        GameObject::new(cache.mesh(Mesh::Torus {
            major_radius: 1.0,
            minor_radius: 0.3,
            major_segments: 16,
            minor_segments: 8,
        }))
        .with_material(Material::rgb(1.0, 1.0, 0.0))
        .with_position(Vec3::new(1.5, 0.0, 0.0))
        .with_rotation(Vec3::new(TORUS_TILT_DEGREES, 0.0, 0.0)),
    );

    LoadedScene {
        scene,
        camera: demo_camera(),
    }
}
