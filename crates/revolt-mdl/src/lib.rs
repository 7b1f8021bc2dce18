//! Decode legacy IDPO (`.mdl`) alias models.
//!
//! This crate provides pure synchronous decoding of the version 6 alias model
//! format: a fixed header, palette-indexed skins, a per-vertex texture
//! coordinate table, a triangle table and a list of animation frames made of
//! compressed vertices. Nothing here talks to a GPU; skins are handed to a
//! caller-supplied [`TextureUploader`] and geometry is pushed into a
//! caller-supplied [`TriangleSink`].
//!
//! # Design principles
//!
//! - **Single pass**: The file is read front to back with no seeking
//! - **All or nothing**: Any failure aborts the load and releases uploaded skins
//! - **Lenient rendering**: Bad triangle indices are skipped at emit time, not
//!   rejected at load time
//!
//! # Key functions
//!
//! - [`Model::open`] / [`Model::load`]: Decode a model from a file or stream
//! - [`Model::emit_frame`]: Emit position, normal and texcoord per corner
//! - [`skin_to_rgba`]: Expand palette indices to RGBA
//! - [`normal`]: Look up a compressed normal index

mod error;
mod reader;

pub mod emit;
pub mod encode;
pub mod frames;
pub mod header;
pub mod model;
pub mod normals;
pub mod palette;
pub mod skins;
pub mod texcoords;
pub mod triangles;

pub use emit::{Corner, TriangleSink};
pub use encode::ModelWriter;
pub use error::{DecodeError, DecodeResult, Feature, Section, UploadError};
pub use frames::{CompressedVertex, Frame};
pub use header::{HEADER_SIZE, Header, MAGIC, SyncType, VERSION};
pub use model::Model;
pub use normals::{NORMALS, NUM_NORMALS, normal};
pub use palette::{PALETTE, TRANSPARENT_INDEX, skin_to_image, skin_to_rgba};
pub use skins::{NoSkins, RgbaSkins, SkinUploadGuard, TextureUploader};
pub use texcoords::TexCoord;
pub use triangles::Triangle;
