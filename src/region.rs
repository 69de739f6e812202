//! Bounds-checked big-endian reads over a borrowed byte slice.
//!
//! All offsets inside a resource fork come from the file itself.  A
//! [`Region`] never indexes its slice directly: each accessor computes the
//! requested range with saturating arithmetic and returns
//! [`ForkError::TruncatedBuffer`] when the range does not fit.

use byteorder::{BigEndian, ByteOrder};
use std::fmt;

use crate::error::ForkError;

/// Which structural part of a fork a [`Region`] covers.  Used in errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    Fork,
    Data,
    Map,
    TypeList,
    NameList,
}

impl fmt::Display for RegionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RegionKind::Fork     => "fork",
            RegionKind::Data     => "data region",
            RegionKind::Map      => "map region",
            RegionKind::TypeList => "type list",
            RegionKind::NameList => "name list",
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Region<'a> {
    kind:  RegionKind,
    bytes: &'a [u8],
}

impl<'a> Region<'a> {
    pub fn new(kind: RegionKind, bytes: &'a [u8]) -> Self {
        Self { kind, bytes }
    }

    pub fn kind(&self) -> RegionKind { self.kind }
    pub fn len(&self) -> usize { self.bytes.len() }
    pub fn is_empty(&self) -> bool { self.bytes.is_empty() }
    pub fn as_slice(&self) -> &'a [u8] { self.bytes }

    /// `len` bytes starting at `offset`.
    pub fn bytes(&self, offset: usize, len: usize) -> Result<&'a [u8], ForkError> {
        let end = offset.saturating_add(len);
        self.bytes
            .get(offset..end)
            .ok_or_else(|| self.out_of_bounds(offset, end))
    }

    #[inline]
    pub fn u8_at(&self, offset: usize) -> Result<u8, ForkError> {
        Ok(self.bytes(offset, 1)?[0])
    }

    #[inline]
    pub fn u16_at(&self, offset: usize) -> Result<u16, ForkError> {
        Ok(BigEndian::read_u16(self.bytes(offset, 2)?))
    }

    #[inline]
    pub fn u32_at(&self, offset: usize) -> Result<u32, ForkError> {
        Ok(BigEndian::read_u32(self.bytes(offset, 4)?))
    }

    /// Sub-region of `len` bytes at `offset`.
    pub fn sub(&self, kind: RegionKind, offset: usize, len: usize) -> Result<Region<'a>, ForkError> {
        Ok(Region::new(kind, self.bytes(offset, len)?))
    }

    /// Sub-region `start..end`.  An inverted range is out of bounds.
    pub fn range(&self, kind: RegionKind, start: usize, end: usize) -> Result<Region<'a>, ForkError> {
        self.bytes
            .get(start..end)
            .map(|b| Region::new(kind, b))
            .ok_or_else(|| self.out_of_bounds(start, end))
    }

    /// Sub-region from `start` to the end of this region.
    pub fn tail(&self, kind: RegionKind, start: usize) -> Result<Region<'a>, ForkError> {
        self.range(kind, start, self.bytes.len())
    }

    fn out_of_bounds(&self, start: usize, end: usize) -> ForkError {
        ForkError::TruncatedBuffer {
            region: self.kind,
            start,
            end,
            size: self.bytes.len(),
        }
    }
}
