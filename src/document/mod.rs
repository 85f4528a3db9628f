//! Hierarchical JSON documents: loading, merging and dataset catalogs.
//!
//! ```ignore
//! use dataset_io::document::{load_layered, resolve_catalog, ManifestCheck};
//!
//! // defaults.json overridden by site.json
//! let config = load_layered(["defaults.json", "site.json"])?;
//! let models = resolve_catalog("/data/CAD", "chairs.json", ManifestCheck::Error)?;
//! ```

mod catalog;
mod merge;

pub use catalog::{has_json_extension, resolve_catalog, Catalog, ManifestCheck, ENTRIES_FIELD};
pub use merge::{merge, merged};

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::util::{Error, Result};

/// Load a JSON document. A file that cannot be opened is reported as
/// [`Error::DocumentRead`] naming the path.
pub fn load_document(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::DocumentRead {
        path: path.to_path_buf(),
        source,
    })?;
    let value = serde_json::from_reader(BufReader::new(file))?;
    debug!("loaded document {}", path.display());
    Ok(value)
}

/// Load documents in order and merge each over the previous ones.
///
/// An empty list yields an empty object.
pub fn load_layered<I, P>(paths: I) -> Result<Value>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut out = Value::Object(Default::default());
    for path in paths {
        let layer = load_document(path)?;
        merge(&mut out, &layer);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_document_names_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("absent.json");
        let err = load_document(&path).unwrap_err();
        assert!(err.to_string().contains("absent.json"));
        assert!(matches!(err, Error::DocumentRead { .. }));
    }

    #[test]
    fn test_invalid_json() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_document(&path), Err(Error::Json(_))));
    }

    #[test]
    fn test_layered() {
        let tmp = tempfile::tempdir().unwrap();
        let a = tmp.path().join("a.json");
        let b = tmp.path().join("b.json");
        std::fs::write(&a, r#"{"io": {"threads": 1, "root": "/data"}}"#).unwrap();
        std::fs::write(&b, r#"{"io": {"threads": 4}}"#).unwrap();
        let doc = load_layered([&a, &b]).unwrap();
        assert_eq!(doc, json!({"io": {"threads": 4, "root": "/data"}}));
        assert_eq!(load_layered(Vec::<&Path>::new()).unwrap(), json!({}));
    }
}
