//! Integration tests for mesh loading.

use std::fs;
use std::io::Write;
use std::path::Path;

use byteorder::{LittleEndian, WriteBytesExt};
use dataset_io::geom::{load_mesh, load_mesh_into, load_mesh_with, Matrix, MeshDecoder};
use dataset_io::{Error, Result};

const QUAD_OBJ: &str = "\
# unit quad with texture coordinates
o quad
v 0.0 0.0 0.0 1.0
v 1.0 0.0 0.0 1.0
v 1.0 1.0 0.0 1.0
v 0.0 1.0 0.0 1.0
vt 0 0
vt 1 0
vt 1 1
vt 0 1
f 1/1 2/2 3/3 4/4
";

#[test]
fn test_obj_truncated_to_three_columns() {
    let tmp = tempfile::tempdir().expect("Failed to create temp dir");
    let path = tmp.path().join("quad.obj");
    fs::write(&path, QUAD_OBJ).unwrap();

    let mesh = load_mesh(&path).expect("Failed to load quad.obj");
    assert_eq!((mesh.vertices.rows(), mesh.vertices.cols()), (4, 3));
    assert_eq!((mesh.faces.rows(), mesh.faces.cols()), (1, 3));
    assert_eq!(mesh.vertices.row(2), &[1.0, 1.0, 0.0]);
    assert_eq!(mesh.face(0), [0, 1, 2]);
}

#[test]
fn test_binary_ply_with_colors() {
    let tmp = tempfile::tempdir().expect("Failed to create temp dir");
    let path = tmp.path().join("tri.ply");
    let mut bytes = b"ply\n\
        format binary_little_endian 1.0\n\
        element vertex 3\n\
        property float x\nproperty float y\nproperty float z\n\
        property uchar red\nproperty uchar green\nproperty uchar blue\n\
        element face 1\n\
        property list uchar int vertex_indices\n\
        end_header\n"
        .to_vec();
    for (p, rgb) in [([0.0f32, 0.0, 0.0], [255u8, 0, 0]), ([2.0, 0.0, 0.0], [0, 255, 0]), ([0.0, 2.0, 1.0], [0, 0, 255])] {
        for c in p {
            bytes.write_f32::<LittleEndian>(c).unwrap();
        }
        bytes.write_all(&rgb).unwrap();
    }
    bytes.write_u8(3).unwrap();
    for i in [0i32, 1, 2] {
        bytes.write_i32::<LittleEndian>(i).unwrap();
    }
    fs::write(&path, bytes).unwrap();

    let mesh = load_mesh(&path).expect("Failed to load tri.ply");
    assert_eq!(mesh.vertices.cols(), 3);
    assert_eq!(mesh.vertices.row(2), &[0.0, 2.0, 1.0]);
    assert_eq!(mesh.face(0), [0, 1, 2]);
    let (lo, hi) = mesh.bounds().unwrap();
    assert_eq!(lo.to_array(), [0.0, 0.0, 0.0]);
    assert_eq!(hi.to_array(), [2.0, 2.0, 1.0]);
}

/// Stand-in for a format that carries extra per-vertex and per-face data.
struct FiveColumn;

impl MeshDecoder for FiveColumn {
    fn decode(&self, _path: &Path) -> Result<(Matrix<f32>, Matrix<i32>)> {
        let v = Matrix::new(3, 5, (0..15).map(|x| x as f32).collect())?;
        let f = Matrix::new(2, 4, vec![0, 1, 2, 9, 2, 1, 0, 9])?;
        Ok((v, f))
    }
}

#[test]
fn test_wide_decoder_keeps_leftmost_columns() {
    let mesh = load_mesh_with("synthetic", &FiveColumn).expect("load failed");
    assert_eq!(mesh.vertices.cols(), 3);
    assert_eq!(mesh.faces.cols(), 3);
    assert_eq!(mesh.vertices.as_slice(), &[0.0, 1.0, 2.0, 5.0, 6.0, 7.0, 10.0, 11.0, 12.0]);
    assert_eq!(mesh.faces.as_slice(), &[0, 1, 2, 2, 1, 0]);
}

#[test]
fn test_bool_variant() {
    let tmp = tempfile::tempdir().expect("Failed to create temp dir");
    let good = tmp.path().join("quad.obj");
    fs::write(&good, QUAD_OBJ).unwrap();
    let bad = tmp.path().join("broken.obj");
    fs::write(&bad, "v 0 0\n").unwrap();

    let mut v = Matrix::default();
    let mut f = Matrix::default();
    assert!(load_mesh_into(&good, &mut v, &mut f));
    assert_eq!((v.rows(), v.cols(), f.cols()), (4, 3, 3));

    assert!(!load_mesh_into(&bad, &mut v, &mut f));
    assert!(v.is_empty() && f.is_empty());
    assert_eq!(v.cols(), 3);

    assert!(!load_mesh_into(tmp.path().join("missing.ply"), &mut v, &mut f));
}

#[test]
fn test_errors() {
    let tmp = tempfile::tempdir().expect("Failed to create temp dir");
    assert!(matches!(load_mesh(tmp.path().join("model.stl")), Err(Error::UnsupportedFormat(_))));
    assert!(matches!(load_mesh(tmp.path().join("missing.obj")), Err(Error::MeshIo { .. })));
}

#[test]
fn test_oversized_ply_header_fails_cleanly() {
    let tmp = tempfile::tempdir().expect("Failed to create temp dir");
    let path = tmp.path().join("huge.ply");
    fs::write(
        &path,
        "ply\nformat ascii 1.0\nelement vertex 3\n\
         property float x\nproperty float y\nproperty float z\n\
         element face 4611686018427387904\nproperty list uchar int vertex_indices\nend_header\n\
         0 0 0\n1 0 0\n0 1 0\n3 0 1 2\n",
    )
    .unwrap();

    let mut v = Matrix::default();
    let mut f = Matrix::default();
    assert!(!load_mesh_into(&path, &mut v, &mut f));
    assert!(v.is_empty() && f.is_empty());
    assert!(matches!(load_mesh(&path), Err(Error::MeshIo { .. })));
}
