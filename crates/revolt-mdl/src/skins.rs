//! Skin table decoding and texture handle ownership.

use std::io::Read;

use image::RgbaImage;

use crate::Header;
use crate::error::{DecodeError, DecodeResult, Feature, Section, UploadError};
use crate::palette::skin_to_rgba;
use crate::reader::Reader;

/// Receives decoded skins and hands back an opaque handle for each.
///
/// Implementations typically upload the pixels to a GPU. Handles created
/// during a load that later fails are passed back to [`release`] before the
/// load returns its error.
///
/// [`release`]: TextureUploader::release
pub trait TextureUploader {
    type Handle;

    /// Upload `width * height` tightly packed RGBA texels.
    fn upload(&mut self, width: u32, height: u32, rgba: &[u8]) -> Result<Self::Handle, UploadError>;

    /// Free a handle returned by [`upload`](TextureUploader::upload).
    fn release(&mut self, handle: Self::Handle);
}

/// Keeps skins on the CPU as [`RgbaImage`]s. The image is the handle.
#[derive(Debug, Default, Clone, Copy)]
pub struct RgbaSkins;

impl TextureUploader for RgbaSkins {
    type Handle = RgbaImage;

    fn upload(&mut self, width: u32, height: u32, rgba: &[u8]) -> Result<RgbaImage, UploadError> {
        RgbaImage::from_raw(width, height, rgba.to_vec())
            .ok_or_else(|| format!("{} bytes do not form a {width}x{height} image", rgba.len()).into())
    }

    fn release(&mut self, _handle: RgbaImage) {}
}

/// Discards skin pixels. Useful when only geometry is needed.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSkins;

impl TextureUploader for NoSkins {
    type Handle = ();

    fn upload(&mut self, _width: u32, _height: u32, _rgba: &[u8]) -> Result<(), UploadError> {
        Ok(())
    }

    fn release(&mut self, _handle: ()) {}
}

/// Owns the handles created so far during a load.
///
/// Dropping the guard releases every handle it still holds, so an early
/// return from the load pipeline cannot leak textures. [`commit`] hands the
/// handles over once the whole file has decoded.
///
/// [`commit`]: SkinUploadGuard::commit
pub struct SkinUploadGuard<'a, U: TextureUploader> {
    uploader: &'a mut U,
    handles: Vec<U::Handle>,
}

impl<'a, U: TextureUploader> SkinUploadGuard<'a, U> {
    pub fn new(uploader: &'a mut U) -> Self {
        Self {
            uploader,
            handles: Vec::new(),
        }
    }

    /// Upload one skin and keep its handle.
    pub fn upload(&mut self, width: u32, height: u32, rgba: &[u8]) -> Result<(), UploadError> {
        let handle = self.uploader.upload(width, height, rgba)?;
        self.handles.push(handle);
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Take ownership of the handles; nothing is released.
    #[must_use]
    pub fn commit(mut self) -> Vec<U::Handle> {
        std::mem::take(&mut self.handles)
    }
}

impl<U: TextureUploader> Drop for SkinUploadGuard<'_, U> {
    fn drop(&mut self) {
        if !self.handles.is_empty() {
            tracing::debug!("Releasing {} skin textures from failed load", self.handles.len());
        }
        for handle in self.handles.drain(..) {
            self.uploader.release(handle);
        }
    }
}

/// Decode `header.num_skins` single skins, uploading each as it is read.
pub(crate) fn read_skins<R: Read, U: TextureUploader>(
    reader: &mut Reader<R>,
    header: &Header,
    guard: &mut SkinUploadGuard<'_, U>,
) -> DecodeResult<()> {
    reader.enter(Section::Skins);
    let area = header
        .skin_area()
        .ok_or(DecodeError::InvalidHeader("skin area overflows"))?;

    for index in 0..header.skin_count() {
        let group = reader.read_i32()?;
        if group != 0 {
            return Err(DecodeError::UnsupportedFeature(Feature::GroupedSkins));
        }

        let indices = reader.read_bytes(area)?;
        let rgba = skin_to_rgba(&indices);
        guard
            .upload(header.skin_width, header.skin_height, &rgba)
            .map_err(|source| DecodeError::Upload { index, source })?;
    }

    Ok(())
}
