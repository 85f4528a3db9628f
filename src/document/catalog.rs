//! Dataset catalogs: a manifest document listing entry names.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::load_document;
use crate::util::{Error, Result};

/// Field holding the entry list.
pub const ENTRIES_FIELD: &str = "entries";

/// What to do with a manifest name that does not carry `.json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManifestCheck {
    /// Return [`Error::InvalidManifestName`]
    #[default]
    Error,
    /// Panic. Matches tools that treat a bad manifest name as a programming error.
    Abort,
}

/// Ordered entry names from a manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub entries: Vec<String>,
}

impl Catalog {
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// `root/<entry><extension>` for each entry. A leading dot is added to
    /// `extension` when missing.
    pub fn paths(&self, root: impl AsRef<Path>, extension: &str) -> Vec<PathBuf> {
        let root = root.as_ref();
        let dot = if extension.starts_with('.') { "" } else { "." };
        self.entries
            .iter()
            .map(|e| root.join(format!("{}{}{}", e, dot, extension)))
            .collect()
    }

    /// Extract the entries of a loaded manifest.
    pub fn from_document(doc: &Value) -> Result<Self> {
        let entries = match doc.get(ENTRIES_FIELD) {
            None => return Ok(Self::default()),
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(Error::InvalidManifest(format!(
                    "\"{}\" must be an array, found {}",
                    ENTRIES_FIELD,
                    kind_name(other)
                )))
            }
        };
        let entries = entries
            .iter()
            .enumerate()
            .map(|(i, v)| match v {
                Value::String(s) => Ok(s.clone()),
                Value::Number(n) => Ok(n.to_string()),
                Value::Bool(b) => Ok(b.to_string()),
                Value::Null => Ok(String::new()),
                other => Err(Error::InvalidManifest(format!(
                    "entry {} is {}, expected a string",
                    i,
                    kind_name(other)
                ))),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { entries })
    }
}

impl IntoIterator for Catalog {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

fn kind_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// True when the part of `name` from its first `.` begins with `.json`.
pub fn has_json_extension(name: &str) -> bool {
    name.find('.').is_some_and(|dot| name[dot..].starts_with(".json"))
}

/// Load `root/manifest` and return its entries in document order.
pub fn resolve_catalog(root: impl AsRef<Path>, manifest: &str, check: ManifestCheck) -> Result<Catalog> {
    if !has_json_extension(manifest) {
        match check {
            ManifestCheck::Abort => panic!("manifest {:?} must have a .json extension", manifest),
            ManifestCheck::Error => return Err(Error::InvalidManifestName(manifest.to_string())),
        }
    }
    let path = root.as_ref().join(manifest);
    let doc = load_document(&path)?;
    let catalog = Catalog::from_document(&doc)?;
    debug!("catalog {}: {} entries", path.display(), catalog.len());
    Ok(catalog)
}
