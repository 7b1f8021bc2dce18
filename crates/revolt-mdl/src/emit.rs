//! Per-frame triangle emission.

use glam::{Vec2, Vec3};

use crate::Model;

/// One emitted triangle corner in model space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corner {
    pub position: Vec3,
    pub normal: Vec3,
    /// Normalized texture coordinate.
    pub tex_coord: Vec2,
}

/// Consumer of emitted corners, e.g. a rasterizer or a vertex buffer builder.
///
/// Corners arrive in triangle order, three per complete triangle. A triangle
/// with unresolved vertex indices contributes fewer than three.
pub trait TriangleSink {
    fn corner(&mut self, corner: &Corner);
}

impl TriangleSink for Vec<Corner> {
    fn corner(&mut self, corner: &Corner) {
        self.push(*corner);
    }
}

impl<F: FnMut(&Corner)> TriangleSink for F {
    fn corner(&mut self, corner: &Corner) {
        self(corner);
    }
}

impl<H> Model<H> {
    /// Emit every triangle corner of `frame` into `sink`.
    ///
    /// Out-of-range frame indices (negative or past the end) use frame 0.
    /// Corners whose vertex slot is missing from either the frame or the
    /// texture coordinate table are skipped. Returns the number of corners
    /// emitted.
    pub fn emit_frame<S: TriangleSink + ?Sized>(&self, frame: i32, sink: &mut S) -> usize {
        let Some(pose) = usize::try_from(frame)
            .ok()
            .and_then(|index| self.frames.get(index))
            .or_else(|| self.frames.first())
        else {
            return 0;
        };

        let header = &self.header;
        let mut emitted = 0;
        for triangle in &self.triangles {
            for &slot in &triangle.vertices {
                let Ok(slot) = usize::try_from(slot) else {
                    continue;
                };
                let (Some(vertex), Some(tex_coord)) =
                    (pose.vertices.get(slot), self.tex_coords.get(slot))
                else {
                    continue;
                };

                sink.corner(&Corner {
                    position: vertex.decompress(header.scale, header.translate),
                    normal: vertex.normal(),
                    tex_coord: tex_coord.normalized(
                        triangle.faces_front,
                        header.skin_width,
                        header.skin_height,
                    ),
                });
                emitted += 1;
            }
        }
        emitted
    }

    /// Collect the corners of `frame` into a new vector.
    #[must_use]
    pub fn frame_corners(&self, frame: i32) -> Vec<Corner> {
        let mut corners = Vec::with_capacity(self.triangles.len() * 3);
        self.emit_frame(frame, &mut corners);
        corners
    }
}
