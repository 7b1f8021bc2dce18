//! Precomputed vertex normal table.
//!
//! Compressed vertices store a one-byte index into this table instead of a
//! full normal vector.

use glam::Vec3;

/// Number of entries in [`NORMALS`].
pub const NUM_NORMALS: usize = 162;

/// Normal used for indices past the end of the table.
pub const FALLBACK_NORMAL: Vec3 = Vec3::Z;

/// Unit normals addressed by [`CompressedVertex::normal_index`](crate::CompressedVertex::normal_index).
pub static NORMALS: [Vec3; NUM_NORMALS] = [
    Vec3::new(-0.525731, 0.000000, 0.850651),
    Vec3::new(-0.442863, 0.238856, 0.864188),
    Vec3::new(-0.295242, 0.000000, 0.955423),
    Vec3::new(-0.309017, 0.500000, 0.809017),
    Vec3::new(-0.162460, 0.262866, 0.951056),
    Vec3::new(0.000000, 0.000000, 1.000000),
    Vec3::new(0.000000, 0.850651, 0.525731),
    Vec3::new(-0.147621, 0.716567, 0.681718),
    Vec3::new(0.147621, 0.716567, 0.681718),
    Vec3::new(0.000000, 0.525731, 0.850651),
    Vec3::new(0.309017, 0.500000, 0.809017),
    Vec3::new(0.525731, 0.000000, 0.850651),
    Vec3::new(0.295242, 0.000000, 0.955423),
    Vec3::new(0.442863, 0.238856, 0.864188),
    Vec3::new(0.162460, 0.262866, 0.951056),
    Vec3::new(-0.681718, 0.147621, 0.716567),
    Vec3::new(-0.809017, 0.309017, 0.500000),
    Vec3::new(-0.587785, 0.425325, 0.688191),
    Vec3::new(-0.850651, 0.525731, 0.000000),
    Vec3::new(-0.864188, 0.442863, 0.238856),
    Vec3::new(-0.716567, 0.681718, 0.147621),
    Vec3::new(-0.688191, 0.587785, 0.425325),
    Vec3::new(-0.500000, 0.809017, 0.309017),
    Vec3::new(-0.238856, 0.864188, 0.442863),
    Vec3::new(-0.425325, 0.688191, 0.587785),
    Vec3::new(-0.716567, 0.681718, -0.147621),
    Vec3::new(-0.500000, 0.809017, -0.309017),
    Vec3::new(-0.525731, 0.850651, 0.000000),
    Vec3::new(0.000000, 0.850651, -0.525731),
    Vec3::new(-0.238856, 0.864188, -0.442863),
    Vec3::new(0.000000, 0.955423, -0.295242),
    Vec3::new(-0.262866, 0.951056, -0.162460),
    Vec3::new(0.000000, 1.000000, 0.000000),
    Vec3::new(0.000000, 0.955423, 0.295242),
    Vec3::new(-0.262866, 0.951056, 0.162460),
    Vec3::new(0.238856, 0.864188, 0.442863),
    Vec3::new(0.262866, 0.951056, 0.162460),
    Vec3::new(0.500000, 0.809017, 0.309017),
    Vec3::new(0.238856, 0.864188, -0.442863),
    Vec3::new(0.262866, 0.951056, -0.162460),
    Vec3::new(0.500000, 0.809017, -0.309017),
    Vec3::new(0.850651, 0.525731, 0.000000),
    Vec3::new(0.716567, 0.681718, 0.147621),
    Vec3::new(0.716567, 0.681718, -0.147621),
    Vec3::new(0.525731, 0.850651, 0.000000),
    Vec3::new(0.425325, 0.688191, 0.587785),
    Vec3::new(0.864188, 0.442863, 0.238856),
    Vec3::new(0.688191, 0.587785, 0.425325),
    Vec3::new(0.809017, 0.309017, 0.500000),
    Vec3::new(0.681718, 0.147621, 0.716567),
    Vec3::new(0.587785, 0.425325, 0.688191),
    Vec3::new(0.955423, 0.295242, 0.000000),
    Vec3::new(1.000000, 0.000000, 0.000000),
    Vec3::new(0.951056, 0.162460, 0.262866),
    Vec3::new(0.850651, -0.525731, 0.000000),
    Vec3::new(0.955423, -0.295242, 0.000000),
    Vec3::new(0.864188, -0.442863, 0.238856),
    Vec3::new(0.951056, -0.162460, 0.262866),
    Vec3::new(0.809017, -0.309017, 0.500000),
    Vec3::new(0.681718, -0.147621, 0.716567),
    Vec3::new(0.850651, 0.000000, 0.525731),
    Vec3::new(0.864188, 0.442863, -0.238856),
    Vec3::new(0.809017, 0.309017, -0.500000),
    Vec3::new(0.951056, 0.162460, -0.262866),
    Vec3::new(0.525731, 0.000000, -0.850651),
    Vec3::new(0.681718, 0.147621, -0.716567),
    Vec3::new(0.681718, -0.147621, -0.716567),
    Vec3::new(0.850651, 0.000000, -0.525731),
    Vec3::new(0.809017, -0.309017, -0.500000),
    Vec3::new(0.864188, -0.442863, -0.238856),
    Vec3::new(0.951056, -0.162460, -0.262866),
    Vec3::new(0.147621, 0.716567, -0.681718),
    Vec3::new(0.309017, 0.500000, -0.809017),
    Vec3::new(0.425325, 0.688191, -0.587785),
    Vec3::new(0.442863, 0.238856, -0.864188),
    Vec3::new(0.587785, 0.425325, -0.688191),
    Vec3::new(0.688191, 0.587785, -0.425325),
    Vec3::new(-0.147621, 0.716567, -0.681718),
    Vec3::new(-0.309017, 0.500000, -0.809017),
    Vec3::new(0.000000, 0.525731, -0.850651),
    Vec3::new(-0.525731, 0.000000, -0.850651),
    Vec3::new(-0.442863, 0.238856, -0.864188),
    Vec3::new(-0.295242, 0.000000, -0.955423),
    Vec3::new(-0.162460, 0.262866, -0.951056),
    Vec3::new(0.000000, 0.000000, -1.000000),
    Vec3::new(0.295242, 0.000000, -0.955423),
    Vec3::new(0.162460, 0.262866, -0.951056),
    Vec3::new(-0.442863, -0.238856, -0.864188),
    Vec3::new(-0.309017, -0.500000, -0.809017),
    Vec3::new(-0.162460, -0.262866, -0.951056),
    Vec3::new(0.000000, -0.850651, -0.525731),
    Vec3::new(-0.147621, -0.716567, -0.681718),
    Vec3::new(0.147621, -0.716567, -0.681718),
    Vec3::new(0.000000, -0.525731, -0.850651),
    Vec3::new(0.309017, -0.500000, -0.809017),
    Vec3::new(0.442863, -0.238856, -0.864188),
    Vec3::new(0.162460, -0.262866, -0.951056),
    Vec3::new(0.238856, -0.864188, -0.442863),
    Vec3::new(0.500000, -0.809017, -0.309017),
    Vec3::new(0.425325, -0.688191, -0.587785),
    Vec3::new(0.716567, -0.681718, -0.147621),
    Vec3::new(0.688191, -0.587785, -0.425325),
    Vec3::new(0.587785, -0.425325, -0.688191),
    Vec3::new(0.000000, -0.955423, -0.295242),
    Vec3::new(0.000000, -1.000000, 0.000000),
    Vec3::new(0.262866, -0.951056, -0.162460),
    Vec3::new(0.000000, -0.850651, 0.525731),
    Vec3::new(0.000000, -0.955423, 0.295242),
    Vec3::new(0.238856, -0.864188, 0.442863),
    Vec3::new(0.262866, -0.951056, 0.162460),
    Vec3::new(0.500000, -0.809017, 0.309017),
    Vec3::new(0.716567, -0.681718, 0.147621),
    Vec3::new(0.525731, -0.850651, 0.000000),
    Vec3::new(-0.238856, -0.864188, -0.442863),
    Vec3::new(-0.500000, -0.809017, -0.309017),
    Vec3::new(-0.262866, -0.951056, -0.162460),
    Vec3::new(-0.850651, -0.525731, 0.000000),
    Vec3::new(-0.716567, -0.681718, -0.147621),
    Vec3::new(-0.716567, -0.681718, 0.147621),
    Vec3::new(-0.525731, -0.850651, 0.000000),
    Vec3::new(-0.500000, -0.809017, 0.309017),
    Vec3::new(-0.238856, -0.864188, 0.442863),
    Vec3::new(-0.262866, -0.951056, 0.162460),
    Vec3::new(-0.864188, -0.442863, 0.238856),
    Vec3::new(-0.809017, -0.309017, 0.500000),
    Vec3::new(-0.688191, -0.587785, 0.425325),
    Vec3::new(-0.681718, -0.147621, 0.716567),
    Vec3::new(-0.442863, -0.238856, 0.864188),
    Vec3::new(-0.587785, -0.425325, 0.688191),
    Vec3::new(-0.309017, -0.500000, 0.809017),
    Vec3::new(-0.147621, -0.716567, 0.681718),
    Vec3::new(-0.425325, -0.688191, 0.587785),
    Vec3::new(-0.162460, -0.262866, 0.951056),
    Vec3::new(0.442863, -0.238856, 0.864188),
    Vec3::new(0.162460, -0.262866, 0.951056),
    Vec3::new(0.309017, -0.500000, 0.809017),
    Vec3::new(0.147621, -0.716567, 0.681718),
    Vec3::new(0.000000, -0.525731, 0.850651),
    Vec3::new(0.425325, -0.688191, 0.587785),
    Vec3::new(0.587785, -0.425325, 0.688191),
    Vec3::new(0.688191, -0.587785, 0.425325),
    Vec3::new(-0.955423, 0.295242, 0.000000),
    Vec3::new(-0.951056, 0.162460, 0.262866),
    Vec3::new(-1.000000, 0.000000, 0.000000),
    Vec3::new(-0.850651, 0.000000, 0.525731),
    Vec3::new(-0.955423, -0.295242, 0.000000),
    Vec3::new(-0.951056, -0.162460, 0.262866),
    Vec3::new(-0.864188, 0.442863, -0.238856),
    Vec3::new(-0.951056, 0.162460, -0.262866),
    Vec3::new(-0.809017, 0.309017, -0.500000),
    Vec3::new(-0.864188, -0.442863, -0.238856),
    Vec3::new(-0.951056, -0.162460, -0.262866),
    Vec3::new(-0.809017, -0.309017, -0.500000),
    Vec3::new(-0.681718, 0.147621, -0.716567),
    Vec3::new(-0.681718, -0.147621, -0.716567),
    Vec3::new(-0.850651, 0.000000, -0.525731),
    Vec3::new(-0.688191, 0.587785, -0.425325),
    Vec3::new(-0.587785, 0.425325, -0.688191),
    Vec3::new(-0.425325, 0.688191, -0.587785),
    Vec3::new(-0.425325, -0.688191, -0.587785),
    Vec3::new(-0.587785, -0.425325, -0.688191),
    Vec3::new(-0.688191, -0.587785, -0.425325),
];

/// Look up a normal, falling back to [`FALLBACK_NORMAL`] for indices ≥ 162.
#[must_use]
pub fn normal(index: u8) -> Vec3 {
    NORMALS
        .get(usize::from(index))
        .copied()
        .unwrap_or(FALLBACK_NORMAL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_holds_unit_vectors() {
        for (i, n) in NORMALS.iter().enumerate() {
            assert!((n.length() - 1.0).abs() < 1e-4, "normal {i} = {n}");
        }
    }

    #[test]
    fn table_is_symmetric() {
        for n in &NORMALS {
            assert!(
                NORMALS.iter().any(|m| (*m + *n).length() < 1e-5),
                "no opposite for {n}"
            );
        }
    }

    #[test]
    fn out_of_range_index_falls_back() {
        assert_eq!(normal(161), NORMALS[161]);
        assert_eq!(normal(162), FALLBACK_NORMAL);
        assert_eq!(normal(255), FALLBACK_NORMAL);
    }
}
