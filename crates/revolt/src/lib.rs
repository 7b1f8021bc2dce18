//! Core of the Revolt demo engine.
//!
//! This crate turns scene descriptions into game objects that reference
//! shared meshes, and draws every mesh through one submission path. It has
//! no window or GPU code; a frontend feeds [`submit`] output into whatever
//! renderer it uses.
//!
//! # Design principles
//!
//! - **One draw path**: Primitives and legacy models all emit corners into a
//!   [`revolt_mdl::TriangleSink`]
//! - **Owned resources**: A [`ResourceCache`] is passed explicitly, never global
//! - **Permissive scenes**: Bad objects are skipped, bad files fall back to the
//!   demo scene
//!
//! # Key functions
//!
//! - [`load_scene`] / [`load_or_demo`]: Build a [`Scene`] and [`Camera`] from JSON
//! - [`submit`]: Emit the triangles of any [`Mesh`]
//! - [`Scene::update`]: Spin objects and advance model animation

mod error;

pub mod cache;
pub mod camera;
pub mod loader;
pub mod mesh;
pub mod scene;

pub use cache::ResourceCache;
pub use camera::Camera;
pub use error::{Error, Result, SceneError};
pub use loader::{LoadedScene, demo_scene, load_or_demo, load_scene, parse_scene};
pub use mesh::{LegacyModel, Mesh, submit};
pub use scene::{GameObject, Material, ObjectId, Scene, SceneSettings};
