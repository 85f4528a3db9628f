//! Edge-map record: `[rows: i32][cols: i32][rows * cols f32]`, little-endian.

use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::util::{Error, Result};

/// Size of the `rows` + `cols` prefix in bytes.
pub const BLOB_HEADER_SIZE: usize = 8;

/// Decoded float raster. Owns its buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterBlob {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl RasterBlob {
    /// Build a blob, checking `data.len() == rows * cols`.
    pub fn new(rows: usize, cols: usize, data: Vec<f32>) -> Result<Self> {
        let expected = checked_area(rows, cols)?;
        if data.len() != expected {
            return Err(Error::malformed(format!(
                "{}x{} raster needs {} values, got {}",
                rows,
                cols,
                expected,
                data.len()
            )));
        }
        Ok(Self { rows, cols, data })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn into_data(self) -> Vec<f32> {
        self.data
    }

    /// Parse one record from `bytes`. Trailing bytes are an error.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < BLOB_HEADER_SIZE {
            return Err(Error::malformed(format!(
                "record header needs {} bytes, got {}",
                BLOB_HEADER_SIZE,
                bytes.len()
            )));
        }
        let mut header = &bytes[..BLOB_HEADER_SIZE];
        let rows = read_dim(&mut header, "rows")?;
        let cols = read_dim(&mut header, "cols")?;

        let body = &bytes[BLOB_HEADER_SIZE..];
        let expected = checked_area(rows, cols)?
            .checked_mul(4)
            .ok_or_else(|| Error::malformed("raster byte size overflows"))?;
        if body.len() != expected {
            return Err(Error::malformed(format!(
                "{}x{} raster needs {} data bytes, got {}",
                rows,
                cols,
                expected,
                body.len()
            )));
        }

        let mut data = vec![0.0f32; rows * cols];
        let mut body = body;
        body.read_f32_into::<LittleEndian>(&mut data)?;
        Ok(Self { rows, cols, data })
    }

    /// Read one record, consuming the reader to its end.
    pub fn read_from<R: Read>(mut reader: R) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::from_bytes(&bytes)
    }

    /// Serialize in the record layout.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        let rows = i32::try_from(self.rows).map_err(|_| Error::malformed("rows exceed i32"))?;
        let cols = i32::try_from(self.cols).map_err(|_| Error::malformed("cols exceed i32"))?;
        writer.write_i32::<LittleEndian>(rows)?;
        writer.write_i32::<LittleEndian>(cols)?;
        for &v in &self.data {
            writer.write_f32::<LittleEndian>(v)?;
        }
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(BLOB_HEADER_SIZE + self.data.len() * 4);
        self.write_to(&mut out)?;
        Ok(out)
    }
}

fn read_dim(header: &mut &[u8], name: &str) -> Result<usize> {
    let v = header.read_i32::<LittleEndian>()?;
    usize::try_from(v).map_err(|_| Error::malformed(format!("negative {}: {}", name, v)))
}

fn checked_area(rows: usize, cols: usize) -> Result<usize> {
    rows.checked_mul(cols)
        .ok_or_else(|| Error::malformed(format!("{}x{} raster overflows", rows, cols)))
}
