//! Memoizing owner of meshes shared between game objects.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use revolt_mdl::{Model, RgbaSkins};

use crate::error::Result;
use crate::mesh::Mesh;

/// Bit-exact identity of a procedural mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum PrimitiveKey {
    Pyramid { base: u32, height: u32 },
    Cube { size: u32 },
    Torus { radii: [u32; 2], segments: [u32; 2] },
}

impl PrimitiveKey {
    fn of(mesh: &Mesh) -> Option<Self> {
        match *mesh {
            Mesh::Pyramid { base, height } => Some(Self::Pyramid {
                base: base.to_bits(),
                height: height.to_bits(),
            }),
            Mesh::Cube { size } => Some(Self::Cube {
                size: size.to_bits(),
            }),
            Mesh::Torus {
                major_radius,
                minor_radius,
                major_segments,
                minor_segments,
            } => Some(Self::Torus {
                radii: [major_radius.to_bits(), minor_radius.to_bits()],
                segments: [major_segments, minor_segments],
            }),
            Mesh::LegacyModel(_) => None,
        }
    }
}

/// Hands out shared meshes, creating each distinct one once.
///
/// Procedural meshes are keyed by kind and parameters, model files by path.
/// A model that fails to load is not remembered, so a later request retries.
#[derive(Debug, Default)]
pub struct ResourceCache {
    primitives: HashMap<PrimitiveKey, Arc<Mesh>>,
    models: HashMap<PathBuf, Arc<Mesh>>,
}

impl ResourceCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle to a procedural mesh.
    ///
    /// Legacy-model meshes passed here are wrapped but not cached; use
    /// [`ResourceCache::model`] to share those by path.
    pub fn mesh(&mut self, mesh: Mesh) -> Arc<Mesh> {
        let Some(key) = PrimitiveKey::of(&mesh) else {
            return Arc::new(mesh);
        };

        if let Some(cached) = self.primitives.get(&key) {
            tracing::debug!("Using cached mesh {:?}", key);
            return Arc::clone(cached);
        }

        tracing::debug!("Created mesh {:?}", key);
        let mesh = Arc::new(mesh);
        self.primitives.insert(key, Arc::clone(&mesh));
        mesh
    }

    /// Shared handle to the model at `path`, decoding it on first use.
    pub fn model(&mut self, path: impl AsRef<Path>) -> Result<Arc<Mesh>> {
        let path = path.as_ref();
        if let Some(cached) = self.models.get(path) {
            tracing::debug!("Using cached model {}", path.display());
            return Ok(Arc::clone(cached));
        }

        let model = Model::open(path, &mut RgbaSkins)?;
        tracing::debug!("Cached model {}", path.display());
        let mesh = Arc::new(Mesh::LegacyModel(Arc::new(model)));
        self.models.insert(path.to_path_buf(), Arc::clone(&mesh));
        Ok(mesh)
    }

    /// Number of distinct meshes held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.primitives.len() + self.models.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached mesh. Handles already given out stay valid.
    pub fn clear(&mut self) {
        self.primitives.clear();
        self.models.clear();
    }
}
