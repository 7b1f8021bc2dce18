//! Writing the binary layout back out.
//!
//! The writer trusts the header: counts are written as given and the tables
//! are written as given, so it can also produce deliberately inconsistent
//! files for testing.

use std::io::{self, Write};

use crate::frames::FRAME_NAME_LEN;
use crate::texcoords::ON_SEAM;
use crate::{Frame, HEADER_SIZE, Header, TexCoord, Triangle};

/// Borrowed tables to serialize as one model file.
#[derive(Debug, Clone, Copy)]
pub struct ModelWriter<'a> {
    pub header: &'a Header,
    /// Palette-index buffers, one per skin.
    pub skins: &'a [Vec<u8>],
    pub tex_coords: &'a [TexCoord],
    pub triangles: &'a [Triangle],
    pub frames: &'a [Frame],
}

impl ModelWriter<'_> {
    pub fn write<W: Write>(&self, mut out: W) -> io::Result<()> {
        out.write_all(&self.to_vec())
    }

    /// Serialize into a fresh buffer.
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        out.extend_from_slice(&self.header.to_bytes());

        for skin in self.skins {
            put_i32(&mut out, 0);
            out.extend_from_slice(skin);
        }

        for coord in self.tex_coords {
            put_i32(&mut out, if coord.on_seam { ON_SEAM } else { 0 });
            put_i32(&mut out, coord.s);
            put_i32(&mut out, coord.t);
        }

        for triangle in self.triangles {
            put_i32(&mut out, i32::from(triangle.faces_front));
            for index in triangle.vertices {
                put_i32(&mut out, index);
            }
        }

        for frame in self.frames {
            put_i32(&mut out, 0);
            out.extend_from_slice(&frame.bbox_min.to_bytes());
            out.extend_from_slice(&frame.bbox_max.to_bytes());
            out.extend_from_slice(&encode_name(&frame.name));
            for vertex in &frame.vertices {
                out.extend_from_slice(&vertex.to_bytes());
            }
        }

        out
    }

    fn encoded_len(&self) -> usize {
        let skins: usize = self.skins.iter().map(|skin| 4 + skin.len()).sum();
        let frames: usize = self
            .frames
            .iter()
            .map(|frame| 4 + 8 + FRAME_NAME_LEN + 4 * frame.vertices.len())
            .sum();
        HEADER_SIZE + skins + 12 * self.tex_coords.len() + 16 * self.triangles.len() + frames
    }
}

fn put_i32(out: &mut Vec<u8>, value: i32) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// NUL-padded name, cut to the field width.
fn encode_name(name: &str) -> [u8; FRAME_NAME_LEN] {
    let mut raw = [0u8; FRAME_NAME_LEN];
    let len = name.len().min(FRAME_NAME_LEN);
    raw[..len].copy_from_slice(&name.as_bytes()[..len]);
    raw
}
