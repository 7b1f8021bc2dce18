//! Animation frame table and compressed vertices.

use std::io::Read;

use glam::Vec3;

use crate::Header;
use crate::error::{DecodeError, DecodeResult, Feature, Section};
use crate::normals::normal;
use crate::reader::{MAX_PREALLOC, Reader};

/// Width of the fixed frame name field.
pub const FRAME_NAME_LEN: usize = 16;

/// Quantized position plus an index into the normal table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompressedVertex {
    pub position: [u8; 3],
    pub normal_index: u8,
}

impl CompressedVertex {
    #[must_use]
    pub fn from_bytes([x, y, z, normal_index]: [u8; 4]) -> Self {
        Self {
            position: [x, y, z],
            normal_index,
        }
    }

    #[must_use]
    pub fn to_bytes(self) -> [u8; 4] {
        let [x, y, z] = self.position;
        [x, y, z, self.normal_index]
    }

    /// `scale * position + translate`, per axis.
    #[must_use]
    pub fn decompress(&self, scale: Vec3, translate: Vec3) -> Vec3 {
        let [x, y, z] = self.position;
        Vec3::new(
            scale.x * f32::from(x) + translate.x,
            scale.y * f32::from(y) + translate.y,
            scale.z * f32::from(z) + translate.z,
        )
    }

    /// The table normal, or `+Z` for an out-of-range index.
    #[must_use]
    pub fn normal(&self) -> Vec3 {
        normal(self.normal_index)
    }
}

/// One complete pose of the model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    pub bbox_min: CompressedVertex,
    pub bbox_max: CompressedVertex,
    /// Label with trailing padding removed.
    pub name: String,
    pub vertices: Vec<CompressedVertex>,
}

impl Frame {
    /// Decompressed bounding box corners.
    #[must_use]
    pub fn bounds(&self, header: &Header) -> (Vec3, Vec3) {
        (
            self.bbox_min.decompress(header.scale, header.translate),
            self.bbox_max.decompress(header.scale, header.translate),
        )
    }
}

/// Decode a fixed-width name: stop at the first NUL, drop trailing blanks.
pub(crate) fn decode_name(raw: &[u8; FRAME_NAME_LEN]) -> String {
    let end = raw.iter().position(|&b| b == 0).unwrap_or(FRAME_NAME_LEN);
    String::from_utf8_lossy(&raw[..end]).trim_end().to_owned()
}

fn read_vertex<R: Read>(reader: &mut Reader<R>) -> DecodeResult<CompressedVertex> {
    reader.read_array::<4>().map(CompressedVertex::from_bytes)
}

/// Read `header.num_frames` simple frames of `header.num_verts` vertices.
pub(crate) fn read_frames<R: Read>(reader: &mut Reader<R>, header: &Header) -> DecodeResult<Vec<Frame>> {
    reader.enter(Section::Frames);
    let vertex_count = header.vertex_count();
    let mut frames = Vec::with_capacity(header.frame_count().min(MAX_PREALLOC));

    for _ in 0..header.frame_count() {
        let kind = reader.read_i32()?;
        if kind != 0 {
            return Err(DecodeError::UnsupportedFeature(Feature::GroupedFrames));
        }

        let bbox_min = read_vertex(reader)?;
        let bbox_max = read_vertex(reader)?;
        let name = decode_name(&reader.read_array::<FRAME_NAME_LEN>()?);

        let mut vertices = Vec::with_capacity(vertex_count.min(MAX_PREALLOC));
        for _ in 0..vertex_count {
            vertices.push(read_vertex(reader)?);
        }

        frames.push(Frame {
            bbox_min,
            bbox_max,
            name,
            vertices,
        });
    }

    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decompress_is_affine() {
        let vertex = CompressedVertex::from_bytes([0, 128, 255, 0]);
        let p = vertex.decompress(Vec3::new(0.5, 2.0, 1.0), Vec3::new(-1.0, 0.0, 10.0));
        assert_eq!(p, Vec3::new(-1.0, 256.0, 265.0));
    }

    #[test]
    fn names_stop_at_nul_and_trim_padding() {
        let mut raw = [0u8; FRAME_NAME_LEN];
        raw[..6].copy_from_slice(b"stand1");
        raw[7..10].copy_from_slice(b"xyz");
        assert_eq!(decode_name(&raw), "stand1");

        let full = *b"run1            ";
        assert_eq!(decode_name(&full), "run1");

        let unterminated = *b"abcdefghijklmnop";
        assert_eq!(decode_name(&unterminated), "abcdefghijklmnop");
    }

    #[test]
    fn grouped_frame_is_rejected() {
        let header = Header {
            num_frames: 1,
            ..Header::default()
        };
        let bytes = 1i32.to_le_bytes();
        let mut reader = Reader::new(&bytes[..]);
        assert!(matches!(
            read_frames(&mut reader, &header),
            Err(DecodeError::UnsupportedFeature(Feature::GroupedFrames))
        ));
    }

    #[test]
    fn missing_vertices_are_truncated() {
        let header = Header {
            num_frames: 1,
            num_verts: 2,
            ..Header::default()
        };
        let mut bytes = 0i32.to_le_bytes().to_vec();
        bytes.extend_from_slice(&[0; 8]);
        bytes.extend_from_slice(&[0; FRAME_NAME_LEN]);
        bytes.extend_from_slice(&[1, 2, 3, 4]);
        let mut reader = Reader::new(bytes.as_slice());
        assert!(matches!(
            read_frames(&mut reader, &header),
            Err(DecodeError::Truncated {
                section: Section::Frames
            })
        ));
    }
}
