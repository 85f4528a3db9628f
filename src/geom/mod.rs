//! Mesh loading.
//!
//! A mesh path is dispatched to a format decoder by the format marker in
//! its name (`.obj` is checked before `.ply`). Whatever the decoder
//! returns is cut down to 3 vertex columns (x, y, z) and 3 face columns
//! (one triangle), so extra attributes such as `w`, colors, normals or the
//! fourth corner of a quad are dropped.

mod matrix;
mod obj;
mod ply;

pub use matrix::Matrix;
pub use obj::{read_obj, ObjDecoder};
pub use ply::{read_ply, PlyDecoder};

use std::path::Path;

use glam::Vec3;
use tracing::{debug, warn};

use crate::util::{Error, Result};

/// Columns kept in both mesh matrices.
pub const MESH_COLUMNS: usize = 3;

/// A format decoder. Returns raw matrices with as many columns as the
/// format carries.
pub trait MeshDecoder {
    fn decode(&self, path: &Path) -> Result<(Matrix<f32>, Matrix<i32>)>;
}

/// Supported mesh formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshFormat {
    Obj,
    Ply,
}

impl MeshFormat {
    /// Detect the format from a path. The marker may appear anywhere in the
    /// path (`model.obj.gz` is OBJ).
    pub fn from_path(path: &Path) -> Option<Self> {
        let s = path.to_string_lossy();
        if s.contains(".obj") {
            Some(Self::Obj)
        } else if s.contains(".ply") {
            Some(Self::Ply)
        } else {
            None
        }
    }

    pub fn decoder(self) -> &'static dyn MeshDecoder {
        match self {
            Self::Obj => &ObjDecoder,
            Self::Ply => &PlyDecoder,
        }
    }
}

/// Triangle mesh: `n x 3` vertex positions and `m x 3` vertex indices.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub vertices: Matrix<f32>,
    pub faces: Matrix<i32>,
}

impl Mesh {
    /// Normalize raw decoder output to 3 columns.
    pub fn from_raw(mut vertices: Matrix<f32>, mut faces: Matrix<i32>) -> Result<Self> {
        normalize(&mut vertices, &mut faces)?;
        Ok(Self { vertices, faces })
    }

    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.rows()
    }

    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.rows()
    }

    pub fn vertex(&self, i: usize) -> Vec3 {
        Vec3::from_slice(self.vertices.row(i))
    }

    pub fn face(&self, i: usize) -> [i32; 3] {
        let f = self.faces.row(i);
        [f[0], f[1], f[2]]
    }

    /// Axis-aligned bounds, or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        (0..self.num_vertices()).map(|i| self.vertex(i)).fold(None, |acc, p| match acc {
            None => Some((p, p)),
            Some((lo, hi)) => Some((lo.min(p), hi.max(p))),
        })
    }
}

/// Cut both matrices to [`MESH_COLUMNS`]. Non-empty matrices narrower than
/// that cannot be a triangle mesh.
fn normalize(vertices: &mut Matrix<f32>, faces: &mut Matrix<i32>) -> Result<()> {
    if vertices.cols() > MESH_COLUMNS || faces.cols() > MESH_COLUMNS {
        debug!(
            "truncating mesh columns: vertices {} -> {}, faces {} -> {}",
            vertices.cols(),
            MESH_COLUMNS,
            faces.cols(),
            MESH_COLUMNS
        );
    }
    vertices.truncate_cols(MESH_COLUMNS);
    faces.truncate_cols(MESH_COLUMNS);
    if vertices.cols() < MESH_COLUMNS || faces.cols() < MESH_COLUMNS {
        return Err(Error::mesh(format!(
            "expected at least {} columns, got vertices {} faces {}",
            MESH_COLUMNS,
            vertices.cols(),
            faces.cols()
        )));
    }
    Ok(())
}

/// Load a mesh through a specific decoder.
pub fn load_mesh_with(path: impl AsRef<Path>, decoder: &dyn MeshDecoder) -> Result<Mesh> {
    let path = path.as_ref();
    let (vertices, faces) = decoder.decode(path).map_err(|e| Error::MeshIo {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let mesh = Mesh::from_raw(vertices, faces).map_err(|e| Error::MeshIo {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    debug!(
        "loaded {}: {} vertices, {} faces",
        path.display(),
        mesh.num_vertices(),
        mesh.num_faces()
    );
    Ok(mesh)
}

/// Load an OBJ or PLY mesh.
///
/// Fails with [`Error::UnsupportedFormat`] when the path names neither
/// format, and with [`Error::MeshIo`] when decoding fails.
pub fn load_mesh(path: impl AsRef<Path>) -> Result<Mesh> {
    let path = path.as_ref();
    let format = MeshFormat::from_path(path)
        .ok_or_else(|| Error::UnsupportedFormat(path.to_path_buf()))?;
    load_mesh_with(path, format.decoder())
}

/// Load a mesh into caller-owned matrices and report success.
///
/// On success `vertices` and `faces` hold the 3-column result. On failure
/// (including an unsupported format) they are reset to empty `0 x 3`
/// matrices.
pub fn load_mesh_into(
    path: impl AsRef<Path>,
    vertices: &mut Matrix<f32>,
    faces: &mut Matrix<i32>,
) -> bool {
    let path = path.as_ref();
    let decoded = match MeshFormat::from_path(path) {
        Some(format) => format.decoder().decode(path),
        None => Err(Error::UnsupportedFormat(path.to_path_buf())),
    };
    let success = match decoded {
        Ok((v, f)) => {
            *vertices = v;
            *faces = f;
            true
        }
        Err(e) => {
            warn!("mesh load failed: {}", e);
            *vertices = Matrix::empty(MESH_COLUMNS);
            *faces = Matrix::empty(MESH_COLUMNS);
            false
        }
    };
    if let Err(e) = normalize(vertices, faces) {
        warn!("mesh load failed for {}: {}", path.display(), e);
        *vertices = Matrix::empty(MESH_COLUMNS);
        *faces = Matrix::empty(MESH_COLUMNS);
        return false;
    }
    success
}
