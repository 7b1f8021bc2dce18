//! Scene loading and per-frame scene updates.
//!
//! Loads the scene once at startup, spawns one entity per object, then each
//! frame advances the engine scene and mirrors transforms and animation
//! frames onto the entities.

use std::path::PathBuf;

use bevy::prelude::*;
use revolt::{ResourceCache, Scene, load_or_demo};

use crate::camera::Orbit;
use crate::mesh::{SceneObjectMarker, convert_material, convert_mesh};

/// Plugin that owns the engine scene.
pub struct SceneLoaderPlugin {
    pub path: PathBuf,
    /// Spin in degrees per second.
    pub rotation_speed: f32,
}

impl Plugin for SceneLoaderPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(SceneSource {
            path: self.path.clone(),
            rotation_speed: self.rotation_speed,
        })
        .add_systems(Startup, spawn_scene)
        .add_systems(Update, update_scene);
    }
}

/// Where the scene comes from.
#[derive(Resource)]
pub struct SceneSource {
    pub path: PathBuf,
    pub rotation_speed: f32,
}

/// The engine-side scene driven by [`update_scene`].
#[derive(Resource)]
pub struct ActiveScene(pub Scene);

#[allow(clippy::needless_pass_by_value)]
fn spawn_scene(
    mut commands: Commands,
    source: Res<SceneSource>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut images: ResMut<Assets<Image>>,
) {
    let mut cache = ResourceCache::new();
    let mut loaded = load_or_demo(&source.path, &mut cache);
    loaded.scene.settings.rotation_speed = source.rotation_speed;

    for (id, object) in loaded.scene.objects() {
        let mesh = meshes.add(convert_mesh(&object.mesh, object.frame));
        let material = materials.add(convert_material(object, &mut images));
        commands.spawn((
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform::from_matrix(object.transform()),
            SceneObjectMarker {
                id,
                shown_frame: object.frame,
            },
        ));
    }

    let camera = loaded.camera;
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: camera.fov_y,
            aspect_ratio: camera.aspect,
            near: camera.near,
            far: camera.far,
            ..Default::default()
        }),
        Transform::from_translation(camera.eye).looking_at(camera.target, camera.up),
        Orbit::from_eye(camera.eye, camera.target),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            ..Default::default()
        },
        Transform::from_xyz(2.0, 4.0, 3.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    tracing::info!(
        "Spawned {} objects ({} distinct meshes)",
        loaded.scene.len(),
        cache.len()
    );
    commands.insert_resource(ActiveScene(loaded.scene));
}

/// Advance the scene and copy its state onto entities.
#[allow(clippy::needless_pass_by_value)]
fn update_scene(
    time: Res<Time>,
    scene: Option<ResMut<ActiveScene>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut query: Query<(&mut SceneObjectMarker, &mut Transform, &mut Mesh3d)>,
) {
    let Some(mut scene) = scene else {
        return;
    };
    scene.0.update(time.delta_secs());

    for (mut marker, mut transform, mut mesh) in &mut query {
        let Some(object) = scene.0.get(marker.id) else {
            continue;
        };
        *transform = Transform::from_matrix(object.transform());

        if object.frame != marker.shown_frame {
            mesh.0 = meshes.add(convert_mesh(&object.mesh, object.frame));
            marker.shown_frame = object.frame;
        }
    }
}
