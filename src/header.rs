use byteorder::{BigEndian, ReadBytesExt};
use std::io::{self, Read};

use crate::error::ForkError;
use crate::region::{Region, RegionKind};

/// Size of the fixed fork header in bytes.
pub const HEADER_SIZE: usize = 16;

/// The four big-endian words at the start of every resource fork.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForkHeader {
    pub data_offset: u32,
    pub map_offset:  u32,
    pub data_length: u32,
    pub map_length:  u32,
}

impl ForkHeader {
    pub fn read<R: Read>(mut reader: R) -> io::Result<Self> {
        Ok(Self {
            data_offset: reader.read_u32::<BigEndian>()?,
            map_offset:  reader.read_u32::<BigEndian>()?,
            data_length: reader.read_u32::<BigEndian>()?,
            map_length:  reader.read_u32::<BigEndian>()?,
        })
    }

    /// Read the header from the start of an in-memory fork.
    pub fn parse(buf: &[u8]) -> Result<Self, ForkError> {
        let truncated = || ForkError::TruncatedHeader { len: buf.len() };
        let head = buf.get(..HEADER_SIZE).ok_or_else(truncated)?;
        Self::read(head).map_err(|_| truncated())
    }

    /// Structural self-check: each region offset must point at a readable
    /// 32-bit word inside `buf`.
    pub fn validate(&self, buf: &[u8]) -> Result<(), ForkError> {
        let fork = Region::new(RegionKind::Fork, buf);
        for (field, offset) in [("data offset", self.data_offset), ("map offset", self.map_offset)] {
            if fork.u32_at(offset as usize).is_err() {
                return Err(ForkError::InvalidHeader { field, offset, size: buf.len() });
            }
        }
        Ok(())
    }

    pub fn data_region<'a>(&self, fork: &Region<'a>) -> Result<Region<'a>, ForkError> {
        fork.sub(RegionKind::Data, self.data_offset as usize, self.data_length as usize)
    }

    pub fn map_region<'a>(&self, fork: &Region<'a>) -> Result<Region<'a>, ForkError> {
        fork.sub(RegionKind::Map, self.map_offset as usize, self.map_length as usize)
    }
}
