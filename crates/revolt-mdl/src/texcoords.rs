//! Texture coordinate table.

use std::io::Read;

use glam::Vec2;

use crate::error::{DecodeResult, Section};
use crate::reader::{MAX_PREALLOC, Reader};

/// Value written for the on-seam flag. Any nonzero value reads as on-seam.
pub const ON_SEAM: i32 = 0x20;

/// Per-vertex-slot texel coordinate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TexCoord {
    /// The vertex sits on the seam between the front and back skin halves.
    pub on_seam: bool,
    pub s: i32,
    pub t: i32,
}

impl TexCoord {
    /// Normalize to `[0, 1]` texture space for a corner of a triangle.
    ///
    /// Back-facing triangles that touch a seam vertex sample the back half of
    /// the skin, which starts `skin_width / 2` texels to the right. A zero
    /// skin dimension yields `0.0` on that axis.
    #[must_use]
    pub fn normalized(&self, faces_front: bool, skin_width: u32, skin_height: u32) -> Vec2 {
        let mut s = self.s as f32;
        let t = self.t as f32;
        if !faces_front && self.on_seam {
            s += skin_width as f32 * 0.5;
        }
        Vec2::new(texel_center(s, skin_width), texel_center(t, skin_height))
    }
}

fn texel_center(coord: f32, dimension: u32) -> f32 {
    if dimension == 0 {
        0.0
    } else {
        (coord + 0.5) / dimension as f32
    }
}

/// Read `count` records of `[on_seam, s, t]`.
pub(crate) fn read_tex_coords<R: Read>(
    reader: &mut Reader<R>,
    count: usize,
) -> DecodeResult<Vec<TexCoord>> {
    reader.enter(Section::TexCoords);
    let mut tex_coords = Vec::with_capacity(count.min(MAX_PREALLOC));
    for _ in 0..count {
        let on_seam = reader.read_i32()? != 0;
        let s = reader.read_i32()?;
        let t = reader.read_i32()?;
        tex_coords.push(TexCoord { on_seam, s, t });
    }
    Ok(tex_coords)
}
