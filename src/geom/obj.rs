//! Wavefront OBJ decoder.
//!
//! Reads `v` and `f` statements. Vertex rows keep every coordinate present
//! (3, or 4 with `w`); face rows keep every corner. Texture and normal
//! references inside face corners are ignored.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use tracing::trace;

use super::{Matrix, MeshDecoder};
use crate::util::{Error, Result};

/// OBJ format decoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjDecoder;

impl MeshDecoder for ObjDecoder {
    fn decode(&self, path: &Path) -> Result<(Matrix<f32>, Matrix<i32>)> {
        let file = File::open(path).map_err(|e| Error::open_failed(path, e))?;
        read_obj(file)
    }
}

/// Decode OBJ text from a reader.
pub fn read_obj<R: Read>(reader: R) -> Result<(Matrix<f32>, Matrix<i32>)> {
    let reader = BufReader::new(reader);
    let mut vertices: Vec<Vec<f32>> = Vec::new();
    let mut faces: Vec<Vec<i32>> = Vec::new();

    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        let lineno = lineno + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut tokens = line.split_whitespace();
        match tokens.next() {
            Some("v") => {
                let coords = tokens
                    .map(|t| {
                        t.parse::<f32>().map_err(|_| {
                            Error::mesh(format!("line {}: bad vertex coordinate {:?}", lineno, t))
                        })
                    })
                    .collect::<Result<Vec<f32>>>()?;
                if coords.len() != 3 && coords.len() != 4 {
                    return Err(Error::mesh(format!(
                        "line {}: vertex has {} coordinates, expected 3 or 4",
                        lineno,
                        coords.len()
                    )));
                }
                vertices.push(coords);
            }
            Some("f") => {
                let corners = tokens
                    .map(|t| corner_index(t, vertices.len(), lineno))
                    .collect::<Result<Vec<i32>>>()?;
                if corners.len() < 3 {
                    return Err(Error::mesh(format!(
                        "line {}: face has {} corners",
                        lineno,
                        corners.len()
                    )));
                }
                faces.push(corners);
            }
            Some(other) => trace!("obj: ignoring {:?} on line {}", other, lineno),
            None => {}
        }
    }

    let vertices = Matrix::<f32>::from_rows(vertices.as_slice())
        .map_err(|e| Error::mesh(format!("inconsistent vertex width: {}", e)))?;
    let faces = Matrix::<i32>::from_rows(faces.as_slice())
        .map_err(|e| Error::mesh(format!("mixed face arity: {}", e)))?;

    check_face_indices(faces.as_slice(), vertices.rows())?;
    Ok((vertices, faces))
}

/// Every index must address a vertex, and the vertex count must fit the `i32` index type.
fn check_face_indices(indices: &[i32], num_vertices: usize) -> Result<()> {
    let n = i32::try_from(num_vertices)
        .map_err(|_| Error::mesh(format!("too many vertices ({}) for i32 face indices", num_vertices)))?;
    if let Some(bad) = indices.iter().find(|&&i| i >= n) {
        return Err(Error::mesh(format!("face index {} out of range ({} vertices)", bad, n)));
    }
    Ok(())
}

/// Zero-based vertex index from a face corner token (`v`, `v/vt`, `v//vn`, `v/vt/vn`).
fn corner_index(token: &str, num_vertices: usize, lineno: usize) -> Result<i32> {
    let head = token.split('/').next().unwrap_or(token);
    let raw: i64 = head
        .parse()
        .map_err(|_| Error::mesh(format!("line {}: bad face index {:?}", lineno, token)))?;
    let index = match raw {
        0 => None,
        r if r > 0 => Some(r - 1),
        r => Some(num_vertices as i64 + r),
    };
    index
        .filter(|&i| i >= 0 && i <= i32::MAX as i64)
        .map(|i| i as i32)
        .ok_or_else(|| Error::mesh(format!("line {}: face index {} out of range", lineno, raw)))
}
