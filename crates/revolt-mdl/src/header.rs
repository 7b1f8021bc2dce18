//! Fixed 84-byte model header.

use std::io::Read;

use byteorder::{ByteOrder, LittleEndian};
use glam::Vec3;

use crate::error::{DecodeError, DecodeResult, Section};
use crate::reader::Reader;

/// Size of the on-disk header in bytes.
pub const HEADER_SIZE: usize = 84;

/// `"IDPO"` read as a little-endian `i32`.
pub const MAGIC: i32 = i32::from_le_bytes(*b"IDPO");

/// The only supported format version.
pub const VERSION: i32 = 6;

/// How the frames of a model are meant to be animated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncType {
    #[default]
    Synchronized,
    Random,
    /// Unknown value, kept so the header round-trips.
    Other(i32),
}

impl SyncType {
    #[must_use]
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            0 => Self::Synchronized,
            1 => Self::Random,
            other => Self::Other(other),
        }
    }

    #[must_use]
    pub fn to_raw(self) -> i32 {
        match self {
            Self::Synchronized => 0,
            Self::Random => 1,
            Self::Other(raw) => raw,
        }
    }
}

/// Decoded model header.
///
/// Counts are validated to be non-negative on parse, so they are stored
/// unsigned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Header {
    /// Per-axis scale applied to compressed vertex positions.
    pub scale: Vec3,
    /// Per-axis offset applied after scaling.
    pub translate: Vec3,
    pub bounding_radius: f32,
    /// Eye position hint for first-person models.
    pub eye_position: Vec3,
    pub num_skins: u32,
    pub skin_width: u32,
    pub skin_height: u32,
    pub num_verts: u32,
    pub num_tris: u32,
    pub num_frames: u32,
    pub sync_type: SyncType,
    pub flags: i32,
    pub size: f32,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            scale: Vec3::ONE,
            translate: Vec3::ZERO,
            bounding_radius: 0.0,
            eye_position: Vec3::ZERO,
            num_skins: 0,
            skin_width: 0,
            skin_height: 0,
            num_verts: 0,
            num_tris: 0,
            num_frames: 0,
            sync_type: SyncType::Synchronized,
            flags: 0,
            size: 0.0,
        }
    }
}

impl Header {
    /// Parse a header from its fixed-size byte block.
    ///
    /// # Layout
    ///
    /// - `0`: magic, `4`: version
    /// - `8`: scale (3 × f32), `20`: translate (3 × f32)
    /// - `32`: bounding radius, `36`: eye position (3 × f32)
    /// - `48`: skins, skin width, skin height, verts, tris, frames,
    ///   sync type, flags (8 × i32)
    /// - `80`: size (f32)
    pub fn parse(bytes: &[u8; HEADER_SIZE]) -> DecodeResult<Self> {
        let int = |offset: usize| LittleEndian::read_i32(&bytes[offset..offset + 4]);
        let float = |offset: usize| LittleEndian::read_f32(&bytes[offset..offset + 4]);
        let vec3 = |offset: usize| Vec3::new(float(offset), float(offset + 4), float(offset + 8));

        let magic = int(0);
        if magic != MAGIC {
            return Err(DecodeError::BadMagic { found: magic });
        }

        let version = int(4);
        if version != VERSION {
            return Err(DecodeError::UnsupportedVersion {
                found: version,
                expected: VERSION,
            });
        }

        let count = |offset: usize, what: &'static str| {
            u32::try_from(int(offset)).map_err(|_| DecodeError::InvalidHeader(what))
        };

        let header = Self {
            scale: vec3(8),
            translate: vec3(20),
            bounding_radius: float(32),
            eye_position: vec3(36),
            num_skins: count(48, "negative skin count")?,
            skin_width: count(52, "negative skin width")?,
            skin_height: count(56, "negative skin height")?,
            num_verts: count(60, "negative vertex count")?,
            num_tris: count(64, "negative triangle count")?,
            num_frames: count(68, "negative frame count")?,
            sync_type: SyncType::from_raw(int(72)),
            flags: int(76),
            size: float(80),
        };

        if header.num_skins > 0 && header.skin_area().is_none_or(|area| area == 0) {
            return Err(DecodeError::InvalidHeader("skins declared with an empty skin area"));
        }

        Ok(header)
    }

    /// Serialize back to the on-disk layout.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        let mut put_int = |offset: usize, value: i32| {
            LittleEndian::write_i32(&mut bytes[offset..offset + 4], value);
        };
        put_int(0, MAGIC);
        put_int(4, VERSION);
        put_int(48, self.num_skins as i32);
        put_int(52, self.skin_width as i32);
        put_int(56, self.skin_height as i32);
        put_int(60, self.num_verts as i32);
        put_int(64, self.num_tris as i32);
        put_int(68, self.num_frames as i32);
        put_int(72, self.sync_type.to_raw());
        put_int(76, self.flags);

        let floats = [
            (8, self.scale),
            (20, self.translate),
            (36, self.eye_position),
        ];
        for (offset, v) in floats {
            for (i, component) in v.to_array().into_iter().enumerate() {
                let at = offset + i * 4;
                LittleEndian::write_f32(&mut bytes[at..at + 4], component);
            }
        }
        LittleEndian::write_f32(&mut bytes[32..36], self.bounding_radius);
        LittleEndian::write_f32(&mut bytes[80..84], self.size);
        bytes
    }

    /// Number of palette indices in one skin, if it fits in memory.
    #[must_use]
    pub fn skin_area(&self) -> Option<usize> {
        (self.skin_width as usize).checked_mul(self.skin_height as usize)
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.num_verts as usize
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.num_tris as usize
    }

    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.num_frames as usize
    }

    #[must_use]
    pub fn skin_count(&self) -> usize {
        self.num_skins as usize
    }
}

/// Read and validate the header block. Nothing past the header is consumed.
pub(crate) fn read_header<R: Read>(reader: &mut Reader<R>) -> DecodeResult<Header> {
    reader.enter(Section::Header);
    let bytes = reader.read_array::<HEADER_SIZE>()?;
    Header::parse(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Header {
        Header {
            scale: Vec3::new(0.5, 1.0, 2.0),
            translate: Vec3::new(-8.0, 4.0, 0.25),
            bounding_radius: 30.0,
            eye_position: Vec3::new(0.0, 0.0, 22.0),
            num_skins: 1,
            skin_width: 8,
            skin_height: 4,
            num_verts: 3,
            num_tris: 1,
            num_frames: 2,
            sync_type: SyncType::Random,
            flags: 0x40,
            size: 12.5,
        }
    }

    #[test]
    fn magic_matches_legacy_constant() {
        assert_eq!(MAGIC, 1_330_660_425);
    }

    #[test]
    fn header_fields_land_at_fixed_offsets() {
        let bytes = sample().to_bytes();
        assert_eq!(&bytes[0..4], b"IDPO");
        assert_eq!(LittleEndian::read_i32(&bytes[4..8]), 6);
        assert_eq!(LittleEndian::read_f32(&bytes[8..12]), 0.5);
        assert_eq!(LittleEndian::read_f32(&bytes[20..24]), -8.0);
        assert_eq!(LittleEndian::read_f32(&bytes[32..36]), 30.0);
        assert_eq!(LittleEndian::read_f32(&bytes[44..48]), 22.0);
        assert_eq!(LittleEndian::read_i32(&bytes[52..56]), 8);
        assert_eq!(LittleEndian::read_i32(&bytes[68..72]), 2);
        assert_eq!(LittleEndian::read_i32(&bytes[76..80]), 0x40);
        assert_eq!(LittleEndian::read_f32(&bytes[80..84]), 12.5);
    }

    #[test]
    fn parse_restores_written_header() {
        let header = sample();
        assert_eq!(Header::parse(&header.to_bytes()).unwrap(), header);
    }

    #[test]
    fn rejects_bad_magic() {
        let mut bytes = sample().to_bytes();
        bytes[0..4].copy_from_slice(b"IDP2");
        assert!(matches!(
            Header::parse(&bytes),
            Err(DecodeError::BadMagic { .. })
        ));
    }

    #[test]
    fn rejects_other_versions() {
        let mut bytes = sample().to_bytes();
        LittleEndian::write_i32(&mut bytes[4..8], 8);
        assert!(matches!(
            Header::parse(&bytes),
            Err(DecodeError::UnsupportedVersion {
                found: 8,
                expected: 6
            })
        ));
    }

    #[test]
    fn rejects_negative_counts() {
        let mut bytes = sample().to_bytes();
        LittleEndian::write_i32(&mut bytes[60..64], -1);
        assert!(matches!(
            Header::parse(&bytes),
            Err(DecodeError::InvalidHeader(_))
        ));
    }

    #[test]
    fn rejects_skins_without_area() {
        let mut header = sample();
        header.skin_height = 0;
        assert!(matches!(
            Header::parse(&header.to_bytes()),
            Err(DecodeError::InvalidHeader(_))
        ));

        header.num_skins = 0;
        assert!(Header::parse(&header.to_bytes()).is_ok());
    }

    #[test]
    fn unknown_sync_type_is_preserved() {
        let mut header = sample();
        header.sync_type = SyncType::Other(7);
        let parsed = Header::parse(&header.to_bytes()).unwrap();
        assert_eq!(parsed.sync_type, SyncType::Other(7));
    }
}
