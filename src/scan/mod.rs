//! Directory indexing for per-frame dataset files.
//!
//! A directory is scanned (without recursion) for names of the form
//! `<prefix><key><suffix>`. Keys are ordered numerically when every key is a
//! number and lexicographically otherwise, then turned back into paths.
//!
//! ```ignore
//! use dataset_io::scan;
//!
//! // frame_000.png, frame_001.png, ...
//! let frames = scan::glob("seq/rgb", "png", Some("frame_"))?;
//! ```

mod pattern;
mod sort;

pub use pattern::GlobPattern;
pub use sort::{sort_keys, SortOrder};

use std::path::{Path, PathBuf};

use tracing::{debug, trace, warn};

use crate::util::{Error, Result};

/// A matched directory entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanEntry {
    /// Variable part of the file name
    pub key: String,
    /// `directory / (prefix + key + suffix)`
    pub path: PathBuf,
}

/// Result of a directory scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    pub entries: Vec<ScanEntry>,
    pub order: SortOrder,
}

impl ScanResult {
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    pub fn into_paths(self) -> Vec<PathBuf> {
        self.entries.into_iter().map(|e| e.path).collect()
    }
}

/// Scan `directory` for files matching `pattern`.
pub fn scan_with(directory: impl AsRef<Path>, pattern: &GlobPattern) -> Result<ScanResult> {
    let directory = directory.as_ref();
    let reader = std::fs::read_dir(directory).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::DirectoryNotFound(directory.to_path_buf())
        } else {
            Error::Io(e)
        }
    })?;

    let mut keys = Vec::new();
    for entry in reader {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            warn!("skipping non UTF-8 entry {:?} in {}", name, directory.display());
            continue;
        };
        match pattern.key_of(name) {
            Some(key) => {
                trace!("match: {} -> key {:?}", name, key);
                keys.push(key.to_string());
            }
            None => trace!("skip: {}", name),
        }
    }

    let order = sort_keys(&mut keys);
    debug!(
        "scanned {}: {} entries matching {}*{}, {:?} order",
        directory.display(),
        keys.len(),
        pattern.prefix(),
        pattern.suffix(),
        order
    );

    let entries = keys
        .into_iter()
        .map(|key| {
            let path = directory.join(pattern.file_name(&key));
            ScanEntry { key, path }
        })
        .collect();

    Ok(ScanResult { entries, order })
}

/// Scan `directory` for `<prefix><key>.<extension>` files.
pub fn scan(
    directory: impl AsRef<Path>,
    extension: &str,
    prefix: Option<&str>,
) -> Result<ScanResult> {
    let mut pattern = GlobPattern::new(extension);
    if let Some(prefix) = prefix {
        pattern = pattern.with_prefix(prefix);
    }
    scan_with(directory, &pattern)
}

/// Ordered paths of `<prefix><key>.<extension>` files in `directory`.
pub fn glob(
    directory: impl AsRef<Path>,
    extension: &str,
    prefix: Option<&str>,
) -> Result<Vec<PathBuf>> {
    scan(directory, extension, prefix).map(ScanResult::into_paths)
}
