//! Triangle table.

use std::io::Read;

use crate::error::{DecodeResult, Section};
use crate::reader::{MAX_PREALLOC, Reader};

/// One triangle of the model.
///
/// Vertex indices are kept exactly as stored, including negative or
/// out-of-range values. The emitter skips corners it cannot resolve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Triangle {
    pub faces_front: bool,
    pub vertices: [i32; 3],
}

/// Read `count` records of `[faces_front, v0, v1, v2]`.
pub(crate) fn read_triangles<R: Read>(
    reader: &mut Reader<R>,
    count: usize,
) -> DecodeResult<Vec<Triangle>> {
    reader.enter(Section::Triangles);
    let mut triangles = Vec::with_capacity(count.min(MAX_PREALLOC));
    for _ in 0..count {
        let faces_front = reader.read_i32()? != 0;
        let vertices = [reader.read_i32()?, reader.read_i32()?, reader.read_i32()?];
        triangles.push(Triangle {
            faces_front,
            vertices,
        });
    }
    Ok(triangles)
}
