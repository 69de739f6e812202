//! Batch decoding of data files.
//!
//! [`decode_files`] reads and decodes a list of files.  With the `parallel`
//! feature each file is decoded on the Rayon pool; forks share nothing, so
//! no synchronisation is needed.  Results always come back in input order,
//! which is the order the caller merges them in.
//!
//! Without the feature, files are decoded one after another and a fail-fast
//! policy stops at the first failure instead of decoding the rest.

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::archive::ErrorPolicy;
use crate::error::LoadError;
use crate::fork::decode;
use crate::index::ResourceIndex;

/// One file's outcome, paired with its path.
pub type Decoded = (PathBuf, Result<ResourceIndex, LoadError>);

/// Read `path` and decode it as a resource fork.
pub fn load_file(path: &Path) -> Result<ResourceIndex, LoadError> {
    let buf = std::fs::read(path)
        .map_err(|source| LoadError::Read { path: path.to_path_buf(), source })?;
    let index = decode(&buf)
        .map_err(|source| LoadError::Decode { path: path.to_path_buf(), source })?;
    debug!(path = %path.display(), resources = index.len(), "decoded data file");
    Ok(index)
}

/// Decode every file in `paths`, preserving order.
///
/// The returned list is shorter than `paths` only when decoding
/// sequentially under [`ErrorPolicy::FailFast`]; it then ends with the
/// failing file.
pub fn decode_files(paths: &[PathBuf], policy: ErrorPolicy) -> Vec<Decoded> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        let _ = policy;
        paths
            .par_iter()
            .map(|p| (p.clone(), load_file(p)))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        let mut out = Vec::with_capacity(paths.len());
        for p in paths {
            let result = load_file(p);
            let failed = result.is_err();
            out.push((p.clone(), result));
            if failed && policy == ErrorPolicy::FailFast {
                break;
            }
        }
        out
    }
}
