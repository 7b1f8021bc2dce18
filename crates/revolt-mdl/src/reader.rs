//! Sequential little-endian reader that tags failures with the file section.

use std::io::{self, Read};

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::{DecodeError, DecodeResult, Section};

/// Upper bound on speculative `Vec` preallocation driven by header counts.
///
/// Counts come straight from the file, so a corrupt header must not be able
/// to request gigabytes before the first short read is noticed.
pub(crate) const MAX_PREALLOC: usize = 4096;

pub(crate) struct Reader<R> {
    inner: R,
    section: Section,
}

impl<R: Read> Reader<R> {
    pub(crate) fn new(inner: R) -> Self {
        Self {
            inner,
            section: Section::Header,
        }
    }

    pub(crate) fn enter(&mut self, section: Section) {
        self.section = section;
    }

    pub(crate) fn read_i32(&mut self) -> DecodeResult<i32> {
        self.inner
            .read_i32::<LittleEndian>()
            .map_err(|e| self.error(e))
    }

    pub(crate) fn read_array<const N: usize>(&mut self) -> DecodeResult<[u8; N]> {
        let mut buf = [0u8; N];
        self.inner.read_exact(&mut buf).map_err(|e| self.error(e))?;
        Ok(buf)
    }

    /// Read exactly `len` bytes without trusting `len` for allocation.
    pub(crate) fn read_bytes(&mut self, len: usize) -> DecodeResult<Vec<u8>> {
        let mut buf = Vec::with_capacity(len.min(MAX_PREALLOC * 16));
        let read = (&mut self.inner).take(len as u64).read_to_end(&mut buf);
        read.map_err(|e| self.error(e))?;
        if buf.len() < len {
            return Err(DecodeError::Truncated {
                section: self.section,
            });
        }
        Ok(buf)
    }

    fn error(&self, source: io::Error) -> DecodeError {
        if source.kind() == io::ErrorKind::UnexpectedEof {
            DecodeError::Truncated {
                section: self.section,
            }
        } else {
            DecodeError::Io {
                section: self.section,
                source,
            }
        }
    }
}
