//! Error types for model decoding.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error returned by a [`TextureUploader`](crate::TextureUploader).
pub type UploadError = Box<dyn std::error::Error + Send + Sync>;

/// Result alias used throughout the decoder.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// The section of the file a read was attempting when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Header,
    Skins,
    TexCoords,
    Triangles,
    Frames,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Header => "header",
            Self::Skins => "skins",
            Self::TexCoords => "texcoords",
            Self::Triangles => "triangles",
            Self::Frames => "frames",
        })
    }
}

/// Format features that exist in the wild but are not decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    /// Animated skin groups (skin discriminator != 0).
    GroupedSkins,
    /// Grouped or interpolated frames (frame discriminator != 0).
    GroupedFrames,
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::GroupedSkins => "grouped skins",
            Self::GroupedFrames => "grouped frames",
        })
    }
}

/// Everything that can abort a model load.
///
/// No variant leaves a partially built model behind: the load either
/// produces a complete [`Model`](crate::Model) or one of these.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DecodeError {
    #[error("bad magic number {found:#010x}, expected IDPO")]
    BadMagic { found: i32 },

    #[error("unsupported version {found}, expected {expected}")]
    UnsupportedVersion { found: i32, expected: i32 },

    #[error("invalid header: {0}")]
    InvalidHeader(&'static str),

    #[error("unsupported feature: {0}")]
    UnsupportedFeature(Feature),

    #[error("truncated {section} data")]
    Truncated { section: Section },

    #[error("cannot open {}: {source}", .path.display())]
    IoUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error while reading {section}: {source}")]
    Io {
        section: Section,
        #[source]
        source: io::Error,
    },

    #[error("texture upload failed for skin {index}: {source}")]
    Upload {
        index: usize,
        #[source]
        source: UploadError,
    },
}
