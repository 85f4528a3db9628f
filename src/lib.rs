//! # dataset-io
//!
//! Dataset ingestion utilities for a perception pipeline: ordered per-frame
//! file listings, OBJ/PLY mesh loading, binary edge-map decoding and
//! hierarchical JSON configuration.
//!
//! ## Modules
//!
//! - [`util`] - Errors, terminal palette, timers
//! - [`scan`] - Directory indexing with numeric/lexicographic key order
//! - [`geom`] - Mesh loading normalized to 3-column matrices
//! - [`raster`] - Edge-map blobs and 8-bit rasters
//! - [`document`] - JSON loading, recursive merge, dataset catalogs
//! - [`config`] - Settings file and environment overrides
//!
//! ## Example
//!
//! ```ignore
//! use dataset_io::prelude::*;
//!
//! for path in glob("seq01/edge", "edge", None)? {
//!     let edges = decode_edge_map(&path)?;
//!     println!("{}: {}x{}", path.display(), edges.rows(), edges.cols());
//! }
//! ```

pub mod util;
pub mod scan;
pub mod geom;
pub mod raster;
pub mod document;
pub mod config;

// Re-export commonly used types
pub use util::{Error, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::util::{ColorMode, Error, Palette, Result, Timer};
    pub use crate::scan::{glob, scan, GlobPattern, SortOrder};
    pub use crate::geom::{load_mesh, load_mesh_into, Matrix, Mesh, MeshDecoder, MeshFormat};
    pub use crate::raster::{decode_edge_map, Raster, RasterBlob};
    pub use crate::document::{load_document, load_layered, merge, resolve_catalog, Catalog, ManifestCheck};
    pub use crate::config::IngestConfig;
}
