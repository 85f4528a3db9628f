//! Edge-map rasters.
//!
//! An edge map is stored as a [`RasterBlob`] of floats in `[0, 1]` and
//! handed out as an 8-bit [`Raster`]: each value is scaled by 255, rounded
//! and saturated.

mod blob;

pub use blob::{RasterBlob, BLOB_HEADER_SIZE};

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::debug;

use crate::util::{Error, Result};

/// Single-channel 8-bit image, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    rows: usize,
    cols: usize,
    pixels: Vec<u8>,
}

impl Raster {
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        if row < self.rows && col < self.cols {
            Some(self.pixels[row * self.cols + col])
        } else {
            None
        }
    }

    /// Row slice. Panics if `r` is out of range.
    pub fn row(&self, r: usize) -> &[u8] {
        &self.pixels[r * self.cols..(r + 1) * self.cols]
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.pixels
    }

    /// Number of non-zero pixels.
    pub fn count_nonzero(&self) -> usize {
        self.pixels.iter().filter(|&&p| p != 0).count()
    }
}

impl From<&RasterBlob> for Raster {
    fn from(blob: &RasterBlob) -> Self {
        Self {
            rows: blob.rows(),
            cols: blob.cols(),
            pixels: blob.data().iter().map(|&v| to_u8(v)).collect(),
        }
    }
}

/// `v * 255`, rounded half to even and saturated to `[0, 255]`. NaN is 0.
#[inline]
pub fn to_u8(v: f32) -> u8 {
    let scaled = (v * 255.0).round_ties_even();
    if scaled.is_nan() {
        0
    } else {
        scaled.clamp(0.0, 255.0) as u8
    }
}

/// Read an edge-map file into an 8-bit raster.
pub fn decode_edge_map(path: impl AsRef<Path>) -> Result<Raster> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::open_failed(path, e))?;
    let blob = RasterBlob::read_from(BufReader::new(file))?;
    let raster = Raster::from(&blob);
    debug!(
        "edge map {}: {}x{}, {} edge pixels",
        path.display(),
        raster.rows(),
        raster.cols(),
        raster.count_nonzero()
    );
    Ok(raster)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_u8() {
        assert_eq!(to_u8(0.0), 0);
        assert_eq!(to_u8(1.0), 255);
        assert_eq!(to_u8(2.0), 255);
        assert_eq!(to_u8(-0.5), 0);
        assert_eq!(to_u8(f32::NAN), 0);
        assert_eq!(to_u8(f32::INFINITY), 255);
        // 127.5 rounds to the even neighbour
        assert_eq!(to_u8(0.5), 128);
    }

    #[test]
    fn test_from_blob() {
        let blob = RasterBlob::new(2, 2, vec![0.0, 0.5, 1.0, 2.0]).unwrap();
        let raster = Raster::from(&blob);
        assert_eq!(raster.as_bytes(), &[0, 128, 255, 255]);
        assert_eq!(raster.get(1, 0), Some(255));
        assert_eq!(raster.get(2, 0), None);
        assert_eq!(raster.row(0), &[0, 128]);
        assert_eq!(raster.count_nonzero(), 3);
    }

    #[test]
    fn test_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let err = decode_edge_map(tmp.path().join("none.bin")).unwrap_err();
        assert!(matches!(err, Error::FileNotFound(_)));
    }
}
