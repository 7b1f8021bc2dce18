//! Drawable meshes and triangle submission.
//!
//! Every mesh, procedural or loaded from a model file, is drawn by pushing
//! triangle corners into a [`TriangleSink`]. Procedural meshes ignore the
//! frame argument.

use std::f32::consts::TAU;
use std::sync::Arc;

use glam::{Vec2, Vec3};
use image::RgbaImage;
use revolt_mdl::{Corner, Model, TriangleSink};

/// A legacy model whose skins are kept as RGBA images.
pub type LegacyModel = Model<RgbaImage>;

/// Segment counts below this produce a degenerate torus.
pub const MIN_TORUS_SEGMENTS: u32 = 3;

/// Everything the engine knows how to draw.
#[derive(Debug, Clone, PartialEq)]
pub enum Mesh {
    /// Square base of side `base` at `y = -height / 2`, apex at `y = height / 2`.
    Pyramid { base: f32, height: f32 },
    /// Axis-aligned cube of side `size` centred on the origin.
    Cube { size: f32 },
    /// Ring around the Y axis.
    Torus {
        major_radius: f32,
        minor_radius: f32,
        major_segments: u32,
        minor_segments: u32,
    },
    /// A decoded `.mdl` file.
    LegacyModel(Arc<LegacyModel>),
}

impl Mesh {
    /// Number of animation frames. Procedural meshes have one.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        match self {
            Self::LegacyModel(model) => model.frame_count(),
            _ => 1,
        }
    }

    /// The decoded model behind a [`Mesh::LegacyModel`].
    #[must_use]
    pub fn as_model(&self) -> Option<&LegacyModel> {
        match self {
            Self::LegacyModel(model) => Some(model),
            _ => None,
        }
    }

    /// Collect the corners of `frame` into a new vector.
    #[must_use]
    pub fn corners(&self, frame: i32) -> Vec<Corner> {
        let mut corners = Vec::new();
        submit(self, frame, &mut corners);
        corners
    }
}

/// Emit the triangles of `mesh` into `sink`, returning the corner count.
///
/// `frame` selects the animation pose of a legacy model and is ignored for
/// procedural meshes.
pub fn submit<S: TriangleSink + ?Sized>(mesh: &Mesh, frame: i32, sink: &mut S) -> usize {
    match mesh {
        Mesh::Pyramid { base, height } => pyramid(*base, *height, sink),
        Mesh::Cube { size } => cube(*size, sink),
        Mesh::Torus {
            major_radius,
            minor_radius,
            major_segments,
            minor_segments,
        } => torus(
            *major_radius,
            *minor_radius,
            *major_segments,
            *minor_segments,
            sink,
        ),
        Mesh::LegacyModel(model) => model.emit_frame(frame, sink),
    }
}

/// Emit one flat-shaded triangle. The normal follows the winding.
fn flat_triangle<S: TriangleSink + ?Sized>(sink: &mut S, positions: [Vec3; 3], uvs: [Vec2; 3]) {
    let [a, b, c] = positions;
    let normal = (b - a).cross(c - a).normalize_or(Vec3::Y);
    for (position, tex_coord) in positions.into_iter().zip(uvs) {
        sink.corner(&Corner {
            position,
            normal,
            tex_coord,
        });
    }
}

fn pyramid<S: TriangleSink + ?Sized>(base: f32, height: f32, sink: &mut S) -> usize {
    let b = base * 0.5;
    let y = height * 0.5;
    let corners = [
        Vec3::new(-b, -y, -b),
        Vec3::new(b, -y, -b),
        Vec3::new(b, -y, b),
        Vec3::new(-b, -y, b),
    ];
    let apex = Vec3::new(0.0, y, 0.0);

    let quad_uvs = [Vec2::ZERO, Vec2::X, Vec2::ONE, Vec2::Y];
    flat_triangle(
        sink,
        [corners[0], corners[1], corners[2]],
        [quad_uvs[0], quad_uvs[1], quad_uvs[2]],
    );
    flat_triangle(
        sink,
        [corners[2], corners[3], corners[0]],
        [quad_uvs[2], quad_uvs[3], quad_uvs[0]],
    );

    let side_uvs = [Vec2::Y, Vec2::ONE, Vec2::new(0.5, 0.0)];
    for (from, to) in [(1, 0), (2, 1), (3, 2), (0, 3)] {
        flat_triangle(sink, [corners[from], corners[to], apex], side_uvs);
    }

    18
}

fn cube<S: TriangleSink + ?Sized>(size: f32, sink: &mut S) -> usize {
    let h = size * 0.5;
    // (normal, u, v) with u x v = normal.
    let faces = [
        (Vec3::X, Vec3::Y, Vec3::Z),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::Z, Vec3::X),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::Y, Vec3::X),
    ];

    for (normal, u, v) in faces {
        let quad = [
            (normal - u - v) * h,
            (normal + u - v) * h,
            (normal + u + v) * h,
            (normal - u + v) * h,
        ];
        flat_triangle(sink, [quad[0], quad[1], quad[2]], [Vec2::ZERO, Vec2::X, Vec2::ONE]);
        flat_triangle(sink, [quad[2], quad[3], quad[0]], [Vec2::ONE, Vec2::Y, Vec2::ZERO]);
    }

    36
}

fn torus<S: TriangleSink + ?Sized>(
    major_radius: f32,
    minor_radius: f32,
    major_segments: u32,
    minor_segments: u32,
    sink: &mut S,
) -> usize {
    let major_segments = major_segments.max(MIN_TORUS_SEGMENTS);
    let minor_segments = minor_segments.max(MIN_TORUS_SEGMENTS);

    let point = |i: u32, j: u32| {
        let u = i as f32 / major_segments as f32;
        let v = j as f32 / minor_segments as f32;
        let (sin_theta, cos_theta) = (u * TAU).sin_cos();
        let (sin_phi, cos_phi) = (v * TAU).sin_cos();
        let normal = Vec3::new(cos_phi * cos_theta, sin_phi, cos_phi * sin_theta);
        let ring = Vec3::new(cos_theta, 0.0, sin_theta) * major_radius;
        Corner {
            position: ring + normal * minor_radius,
            normal,
            tex_coord: Vec2::new(u, v),
        }
    };

    for i in 0..major_segments {
        for j in 0..minor_segments {
            let p00 = point(i, j);
            let p01 = point(i, j + 1);
            let p11 = point(i + 1, j + 1);
            let p10 = point(i + 1, j);
            for corner in [p00, p01, p11, p11, p10, p00] {
                sink.corner(&corner);
            }
        }
    }

    (major_segments * minor_segments * 6) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Face normals of a convex, origin-centred solid point away from the origin.
    fn assert_outward(corners: &[Corner]) {
        for triangle in corners.chunks_exact(3) {
            let centroid = (triangle[0].position + triangle[1].position + triangle[2].position) / 3.0;
            assert!(
                centroid.dot(triangle[0].normal) > 0.0,
                "inward face at {centroid:?}"
            );
        }
    }

    #[test]
    fn pyramid_has_base_and_four_sides() {
        let mesh = Mesh::Pyramid {
            base: 1.0,
            height: 1.5,
        };
        let corners = mesh.corners(0);
        assert_eq!(corners.len(), 18);
        assert_eq!(submit(&mesh, 0, &mut Vec::<Corner>::new()), 18);
        assert_outward(&corners);

        let (min_y, max_y) = corners
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), c| (lo.min(c.position.y), hi.max(c.position.y)));
        assert_eq!((min_y, max_y), (-0.75, 0.75));
        assert!(corners[..6].iter().all(|c| c.normal == Vec3::NEG_Y));
    }

    #[test]
    fn cube_spans_its_size() {
        let corners = Mesh::Cube { size: 0.8 }.corners(0);
        assert_eq!(corners.len(), 36);
        assert_outward(&corners);
        for corner in &corners {
            assert!(corner.position.abs().max_element() <= 0.4 + f32::EPSILON);
            assert!((corner.normal.length() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn torus_triangle_count_follows_segments() {
        let mesh = Mesh::Torus {
            major_radius: 1.0,
            minor_radius: 0.3,
            major_segments: 16,
            minor_segments: 8,
        };
        let corners = mesh.corners(0);
        assert_eq!(corners.len(), 16 * 8 * 2 * 3);

        for corner in &corners {
            let ring = Vec3::new(corner.position.x, 0.0, corner.position.z).normalize();
            let tube = (corner.position - ring).length();
            assert!((tube - 0.3).abs() < 1e-4);
        }
    }

    #[test]
    fn torus_winding_faces_outward() {
        let corners = Mesh::Torus {
            major_radius: 2.0,
            minor_radius: 0.5,
            major_segments: 12,
            minor_segments: 6,
        }
        .corners(0);
        for triangle in corners.chunks_exact(3) {
            let [a, b, c] = [triangle[0].position, triangle[1].position, triangle[2].position];
            let face = (b - a).cross(c - a);
            let smooth = triangle[0].normal + triangle[1].normal + triangle[2].normal;
            assert!(face.dot(smooth) > 0.0);
        }
    }

    #[test]
    fn torus_segments_are_clamped() {
        let mesh = Mesh::Torus {
            major_radius: 1.0,
            minor_radius: 0.3,
            major_segments: 0,
            minor_segments: 1,
        };
        assert_eq!(submit(&mesh, 0, &mut Vec::<Corner>::new()), 3 * 3 * 6);
    }

    #[test]
    fn procedural_meshes_have_one_frame() {
        assert_eq!(Mesh::Cube { size: 1.0 }.frame_count(), 1);
        assert!(Mesh::Cube { size: 1.0 }.as_model().is_none());
    }
}
