//! Decoded model and the load pipeline.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use image::RgbaImage;

use crate::error::{DecodeError, DecodeResult};
use crate::frames::{Frame, read_frames};
use crate::header::{Header, read_header};
use crate::reader::Reader;
use crate::skins::{SkinUploadGuard, TextureUploader, read_skins};
use crate::texcoords::{TexCoord, read_tex_coords};
use crate::triangles::{Triangle, read_triangles};

/// A fully decoded model.
///
/// All tables are filled by a single sequential pass and never change
/// afterwards, so a `Model` can be shared between threads once loaded.
/// `H` is the texture handle type produced by the [`TextureUploader`] used
/// during the load.
#[derive(Debug, Clone, PartialEq)]
pub struct Model<H = RgbaImage> {
    pub(crate) header: Header,
    pub(crate) skins: Vec<H>,
    pub(crate) tex_coords: Vec<TexCoord>,
    pub(crate) triangles: Vec<Triangle>,
    pub(crate) frames: Vec<Frame>,
}

impl<H> Model<H> {
    /// Decode a model from a sequential byte stream.
    ///
    /// Stages run in file order: header, skins, texture coordinates,
    /// triangles, frames. The first failure aborts the load. Skins that were
    /// already uploaded are released through `uploader` before the error is
    /// returned.
    pub fn load<R, U>(reader: R, uploader: &mut U) -> DecodeResult<Self>
    where
        R: Read,
        U: TextureUploader<Handle = H>,
    {
        let mut reader = Reader::new(reader);
        let header = read_header(&mut reader)?;

        let mut guard = SkinUploadGuard::new(uploader);
        read_skins(&mut reader, &header, &mut guard)?;
        let tex_coords = read_tex_coords(&mut reader, header.vertex_count())?;
        let triangles = read_triangles(&mut reader, header.triangle_count())?;
        let frames = read_frames(&mut reader, &header)?;
        let skins = guard.commit();

        tracing::debug!(
            "Decoded model: {} vertices, {} triangles, {} frames, {} skins",
            header.num_verts,
            header.num_tris,
            header.num_frames,
            skins.len()
        );

        Ok(Self {
            header,
            skins,
            tex_coords,
            triangles,
            frames,
        })
    }

    /// Decode a model held in memory.
    pub fn from_bytes<U>(bytes: &[u8], uploader: &mut U) -> DecodeResult<Self>
    where
        U: TextureUploader<Handle = H>,
    {
        Self::load(bytes, uploader)
    }

    /// Open and decode a model file.
    pub fn open<P, U>(path: P, uploader: &mut U) -> DecodeResult<Self>
    where
        P: AsRef<Path>,
        U: TextureUploader<Handle = H>,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DecodeError::IoUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        let model = Self::load(BufReader::new(file), uploader)?;
        tracing::info!(
            "Loaded model {}: {} vertices, {} triangles, {} frames",
            path.display(),
            model.header.num_verts,
            model.header.num_tris,
            model.header.num_frames
        );
        Ok(model)
    }

    #[must_use]
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Texture handles, one per skin, in file order.
    #[must_use]
    pub fn skins(&self) -> &[H] {
        &self.skins
    }

    #[must_use]
    pub fn tex_coords(&self) -> &[TexCoord] {
        &self.tex_coords
    }

    #[must_use]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    /// Index of the first frame with the given name.
    #[must_use]
    pub fn frame_by_name(&self, name: &str) -> Option<usize> {
        self.frames.iter().position(|frame| frame.name == name)
    }

    /// Give every skin handle back to the uploader that created it.
    pub fn release<U>(self, uploader: &mut U)
    where
        U: TextureUploader<Handle = H>,
    {
        for handle in self.skins {
            uploader.release(handle);
        }
    }
}
