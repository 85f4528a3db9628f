//! Integration tests for edge-map decoding.

use std::fs;

use byteorder::{LittleEndian, WriteBytesExt};
use dataset_io::raster::{decode_edge_map, RasterBlob};
use dataset_io::Error;

fn record(rows: i32, cols: i32, data: &[f32]) -> Vec<u8> {
    let mut out = Vec::new();
    out.write_i32::<LittleEndian>(rows).unwrap();
    out.write_i32::<LittleEndian>(cols).unwrap();
    for &v in data {
        out.write_f32::<LittleEndian>(v).unwrap();
    }
    out
}

#[test]
fn test_boundary_values() {
    let tmp = tempfile::tempdir().expect("Failed to create temp dir");
    let path = tmp.path().join("000001.edge");
    fs::write(&path, record(2, 2, &[0.0, 0.5, 1.0, 2.0])).unwrap();

    let raster = decode_edge_map(&path).expect("decode failed");
    assert_eq!((raster.rows(), raster.cols()), (2, 2));
    let px = raster.as_bytes();
    assert_eq!(px[0], 0);
    assert!(px[1] == 127 || px[1] == 128);
    assert_eq!(px[2], 255);
    assert_eq!(px[3], 255);
}

#[test]
fn test_dimension_mismatch_fails() {
    let tmp = tempfile::tempdir().expect("Failed to create temp dir");
    let path = tmp.path().join("bad.edge");
    fs::write(&path, record(3, 3, &[0.0; 8])).unwrap();
    assert!(matches!(decode_edge_map(&path), Err(Error::MalformedRecord(_))));

    fs::write(&path, record(1, 1, &[0.0, 0.0])).unwrap();
    assert!(matches!(decode_edge_map(&path), Err(Error::MalformedRecord(_))));
}

#[test]
fn test_truncated_file_fails() {
    let tmp = tempfile::tempdir().expect("Failed to create temp dir");
    let path = tmp.path().join("short.edge");
    fs::write(&path, [2u8, 0, 0]).unwrap();
    assert!(decode_edge_map(&path).is_err());
}

#[test]
fn test_written_blob_decodes() {
    let tmp = tempfile::tempdir().expect("Failed to create temp dir");
    let path = tmp.path().join("grad.edge");
    let data: Vec<f32> = (0..12).map(|i| i as f32 / 11.0).collect();
    let blob = RasterBlob::new(3, 4, data).unwrap();
    let file = fs::File::create(&path).unwrap();
    blob.write_to(file).unwrap();

    let raster = decode_edge_map(&path).expect("decode failed");
    assert_eq!((raster.rows(), raster.cols()), (3, 4));
    assert_eq!(raster.get(0, 0), Some(0));
    assert_eq!(raster.get(2, 3), Some(255));
    let row: Vec<u8> = raster.row(1).to_vec();
    assert!(row.windows(2).all(|w| w[0] <= w[1]));
}
