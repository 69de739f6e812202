use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::region::RegionKind;

/// Failure to decode a single resource fork.
///
/// Every variant is fatal for the fork being decoded; no partial index is
/// ever produced.
#[derive(Error, Debug)]
pub enum ForkError {
    #[error("Truncated header: {len} bytes, need 16")]
    TruncatedHeader { len: usize },
    #[error("Invalid header: {field} {offset:#x} lies outside the {size}-byte fork")]
    InvalidHeader {
        field:  &'static str,
        offset: u32,
        size:   usize,
    },
    #[error("Truncated {region}: bytes {start}..{end} requested, {size} available")]
    TruncatedBuffer {
        region: RegionKind,
        start:  usize,
        end:    usize,
        size:   usize,
    },
    #[error("Duplicate resource type '{0}'")]
    DuplicateType(String),
    #[error("Duplicate resource id {id} in type '{type_tag}'")]
    DuplicateId { type_tag: String, id: u16 },
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Failure while discovering, reading or decoding a set of data files.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Cannot resolve {}: {source}", .path.display())]
    Path { path: PathBuf, source: io::Error },
    #[error("Walking {}: {source}", .path.display())]
    Walk { path: PathBuf, source: walkdir::Error },
    #[error("Reading {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("Decoding {}: {source}", .path.display())]
    Decode { path: PathBuf, source: ForkError },
}

impl LoadError {
    /// The file or root the error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            LoadError::Path { path, .. }
            | LoadError::Walk { path, .. }
            | LoadError::Read { path, .. }
            | LoadError::Decode { path, .. } => path,
        }
    }
}
