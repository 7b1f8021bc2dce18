//! Loading scene files from disk.

use std::fs;
use std::path::Path;

use glam::{Vec3, Vec4};
use revolt::{Mesh, ResourceCache, SceneError, load_or_demo, load_scene};
use revolt_mdl::{CompressedVertex, Frame, Header, ModelWriter, TexCoord, Triangle};

fn write_model(path: &Path, frames: u32) {
    let header = Header {
        num_skins: 1,
        skin_width: 2,
        skin_height: 2,
        num_verts: 3,
        num_tris: 1,
        num_frames: frames,
        ..Header::default()
    };
    let frame = Frame {
        name: "idle".into(),
        vertices: vec![
            CompressedVertex::from_bytes([0, 0, 0, 0]),
            CompressedVertex::from_bytes([1, 0, 0, 0]),
            CompressedVertex::from_bytes([0, 1, 0, 0]),
        ],
        ..Frame::default()
    };
    let bytes = ModelWriter {
        header: &header,
        skins: &[vec![0, 1, 2, 255]],
        tex_coords: &[TexCoord::default(); 3],
        triangles: &[Triangle {
            faces_front: true,
            vertices: [0, 1, 2],
        }],
        frames: &vec![frame; frames as usize],
    }
    .to_vec();
    fs::write(path, bytes).unwrap();
}

const FULL_SCENE: &str = r#"{
  "camera": {
    "fov": 0.9, "aspect": 1.5, "near": 0.5, "far": 50.0,
    "position": [1.0, 2.0, 3.0], "lookAt": [0.0, 1.0, 0.0]
  },
  "objects": [
    {
      "type": "Pyramid",
      "parameters": { "base": 2.0, "height": 3.0 },
      "material": { "color": [1.0, 0.0, 0.0, 1.0] },
      "position": [-1.0, 0.0, 0.0],
      "rotation": [0.0, 0.0, 0.0],
      "scale": [1.0, 1.0, 1.0]
    },
    {
      "type": "Torus",
      "parameters": { "majorRadius": 1.0, "minorRadius": 0.25, "majorSegments": 12, "minorSegments": 6 },
      "material": { "color": [1.0, 1.0, 0.0, 0.5] },
      "position": [2.0, 0.0, 0.0],
      "rotation": [10.0, 20.0, 30.0],
      "scale": [2.0, 2.0, 2.0]
    },
    { "type": "Teapot" },
    { "type": "Model", "parameters": { "path": "models/tri.mdl", "frame": 1 } },
    { "type": "Model", "parameters": { "path": "models/missing.mdl" } }
  ]
}"#;

#[test]
fn full_scene_loads_with_skips() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("models")).unwrap();
    write_model(&dir.path().join("models/tri.mdl"), 2);
    let scene_path = dir.path().join("scene.json");
    fs::write(&scene_path, FULL_SCENE).unwrap();

    let mut cache = ResourceCache::new();
    let loaded = load_scene(&scene_path, &mut cache).unwrap();

    let camera = loaded.camera;
    assert_eq!(camera.fov_y, 0.9);
    assert_eq!(camera.aspect, 1.5);
    assert_eq!((camera.near, camera.far), (0.5, 50.0));
    assert_eq!(camera.eye, Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(camera.target, Vec3::new(0.0, 1.0, 0.0));

    let objects: Vec<_> = loaded.scene.objects().map(|(_, o)| o).collect();
    assert_eq!(objects.len(), 3);

    assert_eq!(
        *objects[0].mesh,
        Mesh::Pyramid {
            base: 2.0,
            height: 3.0
        }
    );

    let torus = objects[1];
    assert_eq!(torus.rotation_degrees, Vec3::new(100.0, 20.0, 30.0));
    assert_eq!(torus.scale, Vec3::splat(2.0));
    assert_eq!(torus.material.color, Vec4::new(1.0, 1.0, 0.0, 0.5));

    let model = objects[2];
    assert_eq!(model.frame, 1);
    let decoded = model.mesh.as_model().unwrap();
    assert_eq!(decoded.frame_count(), 2);
    assert_eq!(decoded.skins()[0].get_pixel(1, 1).0, [0, 0, 0, 0]);
}

#[test]
fn shared_parameters_share_meshes() {
    let dir = tempfile::tempdir().unwrap();
    let scene_path = dir.path().join("cubes.json");
    fs::write(
        &scene_path,
        r#"{ "objects": [
            { "type": "Cube", "parameters": { "size": 0.5 } },
            { "type": "Cube", "parameters": { "size": 0.5 }, "position": [1, 0, 0] }
        ] }"#,
    )
    .unwrap();

    let mut cache = ResourceCache::new();
    let loaded = load_scene(&scene_path, &mut cache).unwrap();
    let meshes: Vec<_> = loaded.scene.objects().map(|(_, o)| o.mesh.clone()).collect();
    assert!(std::sync::Arc::ptr_eq(&meshes[0], &meshes[1]));
    assert_eq!(cache.len(), 1);
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_scene(dir.path().join("nope.json"), &mut ResourceCache::new());
    assert!(matches!(result, Err(SceneError::Read { .. })));
}

#[test]
fn malformed_file_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let scene_path = dir.path().join("broken.json");
    fs::write(&scene_path, "{ \"objects\": [ ").unwrap();
    let result = load_scene(&scene_path, &mut ResourceCache::new());
    assert!(matches!(result, Err(SceneError::Parse { .. })));
}

#[test]
fn unusable_file_falls_back_to_demo() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = load_or_demo(dir.path().join("nope.json"), &mut ResourceCache::new());
    assert_eq!(loaded.scene.len(), 3);
    assert_eq!(loaded.camera.far, 100.0);
}

#[test]
fn shipped_demo_scene_parses() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../assets/demo_scene.json");
    let loaded = load_scene(path, &mut ResourceCache::new()).unwrap();
    assert_eq!(loaded.scene.len(), 3);
}
