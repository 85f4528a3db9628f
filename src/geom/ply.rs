//! Stanford PLY decoder.
//!
//! Supports `ascii`, `binary_little_endian` and `binary_big_endian` bodies.
//! Every scalar property of the `vertex` element becomes a column, with
//! `x`, `y`, `z` first and the rest in declaration order. The face list
//! property (`vertex_indices` or `vertex_index`) becomes the face matrix.
//! Other elements and properties are read and discarded.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::marker::PhantomData;
use std::path::Path;

use byteorder::{BigEndian, ByteOrder, LittleEndian, ReadBytesExt};
use tracing::{debug, trace};

use super::{Matrix, MeshDecoder};
use crate::util::{Error, Result};

/// PLY format decoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlyDecoder;

impl MeshDecoder for PlyDecoder {
    fn decode(&self, path: &Path) -> Result<(Matrix<f32>, Matrix<i32>)> {
        let file = File::open(path).map_err(|e| Error::open_failed(path, e))?;
        read_ply(file)
    }
}

// ============================================================================
// Header
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Encoding {
    Ascii,
    BinaryLittleEndian,
    BinaryBigEndian,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scalar {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    F32,
    F64,
}

impl Scalar {
    fn parse(name: &str) -> Result<Self> {
        Ok(match name {
            "char" | "int8" => Self::I8,
            "uchar" | "uint8" => Self::U8,
            "short" | "int16" => Self::I16,
            "ushort" | "uint16" => Self::U16,
            "int" | "int32" => Self::I32,
            "uint" | "uint32" => Self::U32,
            "float" | "float32" => Self::F32,
            "double" | "float64" => Self::F64,
            other => return Err(Error::mesh(format!("unknown PLY type {:?}", other))),
        })
    }
}

#[derive(Debug, Clone)]
enum PropertyKind {
    Scalar(Scalar),
    List { count: Scalar, item: Scalar },
}

#[derive(Debug, Clone)]
struct Property {
    name: String,
    kind: PropertyKind,
}

#[derive(Debug, Clone)]
struct Element {
    name: String,
    count: usize,
    properties: Vec<Property>,
}

#[derive(Debug)]
struct Header {
    encoding: Encoding,
    elements: Vec<Element>,
}

fn read_header<R: BufRead>(reader: &mut R) -> Result<Header> {
    let mut line = String::new();
    let mut next_line = |reader: &mut R| -> Result<String> {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Err(Error::mesh("PLY header truncated"));
        }
        Ok(line.trim().to_string())
    };

    if next_line(reader)? != "ply" {
        return Err(Error::mesh("missing PLY magic"));
    }

    let mut encoding = None;
    let mut elements: Vec<Element> = Vec::new();
    loop {
        let line = next_line(reader)?;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            [] => continue,
            ["end_header"] => break,
            ["comment", ..] | ["obj_info", ..] => continue,
            ["format", fmt, _version] => {
                encoding = Some(match *fmt {
                    "ascii" => Encoding::Ascii,
                    "binary_little_endian" => Encoding::BinaryLittleEndian,
                    "binary_big_endian" => Encoding::BinaryBigEndian,
                    other => return Err(Error::mesh(format!("unknown PLY format {:?}", other))),
                });
            }
            ["element", name, count] => {
                let count = count
                    .parse()
                    .map_err(|_| Error::mesh(format!("bad element count {:?}", count)))?;
                elements.push(Element { name: name.to_string(), count, properties: Vec::new() });
            }
            ["property", "list", count, item, name] => {
                let element = elements
                    .last_mut()
                    .ok_or_else(|| Error::mesh("property before any element"))?;
                element.properties.push(Property {
                    name: name.to_string(),
                    kind: PropertyKind::List { count: Scalar::parse(count)?, item: Scalar::parse(item)? },
                });
            }
            ["property", ty, name] => {
                let element = elements
                    .last_mut()
                    .ok_or_else(|| Error::mesh("property before any element"))?;
                element.properties.push(Property {
                    name: name.to_string(),
                    kind: PropertyKind::Scalar(Scalar::parse(ty)?),
                });
            }
            _ => return Err(Error::mesh(format!("bad PLY header line {:?}", line))),
        }
    }

    let encoding = encoding.ok_or_else(|| Error::mesh("PLY header has no format line"))?;
    Ok(Header { encoding, elements })
}

// ============================================================================
// Body
// ============================================================================

/// Source of scalar values for the element bodies.
trait Values {
    fn next(&mut self, ty: Scalar) -> Result<f64>;
}

struct AsciiValues<'a> {
    tokens: std::str::SplitWhitespace<'a>,
}

impl Values for AsciiValues<'_> {
    fn next(&mut self, ty: Scalar) -> Result<f64> {
        let token = self.tokens.next().ok_or_else(|| Error::mesh("PLY body truncated"))?;
        let bad = || Error::mesh(format!("bad PLY value {:?}", token));
        match ty {
            Scalar::F32 | Scalar::F64 => token.parse::<f64>().map_err(|_| bad()),
            _ => token.parse::<i64>().map(|v| v as f64).map_err(|_| bad()),
        }
    }
}

struct BinaryValues<R, B> {
    reader: R,
    _order: PhantomData<B>,
}

impl<R: Read, B: ByteOrder> Values for BinaryValues<R, B> {
    fn next(&mut self, ty: Scalar) -> Result<f64> {
        let r = &mut self.reader;
        let value = match ty {
            Scalar::I8 => r.read_i8()? as f64,
            Scalar::U8 => r.read_u8()? as f64,
            Scalar::I16 => r.read_i16::<B>()? as f64,
            Scalar::U16 => r.read_u16::<B>()? as f64,
            Scalar::I32 => r.read_i32::<B>()? as f64,
            Scalar::U32 => r.read_u32::<B>()? as f64,
            Scalar::F32 => r.read_f32::<B>()? as f64,
            Scalar::F64 => r.read_f64::<B>()?,
        };
        Ok(value)
    }
}

const FACE_LIST_NAMES: [&str; 2] = ["vertex_indices", "vertex_index"];

/// Upper bound on rows or list items reserved up front from header counts.
const MAX_RESERVE: usize = 1 << 16;

fn decode_body<V: Values>(header: &Header, values: &mut V) -> Result<(Matrix<f32>, Matrix<i32>)> {
    let mut vertices = None;
    let mut faces = None;

    for element in &header.elements {
        match element.name.as_str() {
            "vertex" => vertices = Some(read_vertices(element, values)?),
            "face" => faces = Some(read_faces(element, values)?),
            _ => {
                trace!("ply: skipping element {:?} ({} items)", element.name, element.count);
                for _ in 0..element.count {
                    skip_item(element, values)?;
                }
            }
        }
    }

    let vertices = vertices.ok_or_else(|| Error::mesh("PLY has no vertex element"))?;
    let faces = faces.unwrap_or_else(|| Matrix::empty(3));
    let n = vertices.rows() as i64;
    if let Some(bad) = faces.as_slice().iter().find(|&&i| i < 0 || i as i64 >= n) {
        return Err(Error::mesh(format!("face index {} out of range ({} vertices)", bad, n)));
    }
    Ok((vertices, faces))
}

fn read_vertices<V: Values>(element: &Element, values: &mut V) -> Result<Matrix<f32>> {
    // Column order: x, y, z, then the remaining scalar properties.
    let scalar_names: Vec<&str> = element
        .properties
        .iter()
        .filter(|p| matches!(p.kind, PropertyKind::Scalar(_)))
        .map(|p| p.name.as_str())
        .collect();
    let mut columns: Vec<&str> = Vec::with_capacity(scalar_names.len());
    for axis in ["x", "y", "z"] {
        if !scalar_names.contains(&axis) {
            return Err(Error::mesh(format!("PLY vertex element has no {:?} property", axis)));
        }
        columns.push(axis);
    }
    columns.extend(scalar_names.iter().copied().filter(|n| !["x", "y", "z"].contains(n)));

    let cols = columns.len();
    if element.count.checked_mul(cols).is_none() {
        return Err(Error::mesh(format!("PLY vertex count {} too large", element.count)));
    }
    let mut data = Vec::with_capacity(element.count.min(MAX_RESERVE) * cols);
    let mut row = vec![0.0f32; cols];
    for _ in 0..element.count {
        for prop in &element.properties {
            match prop.kind {
                PropertyKind::Scalar(ty) => {
                    let v = values.next(ty)?;
                    if let Some(c) = columns.iter().position(|&n| n == prop.name) {
                        row[c] = v as f32;
                    }
                }
                PropertyKind::List { count, item } => skip_list(count, item, values)?,
            }
        }
        data.extend_from_slice(&row);
    }
    Matrix::new(element.count, cols, data)
}

fn read_faces<V: Values>(element: &Element, values: &mut V) -> Result<Matrix<i32>> {
    let list_name = element.properties.iter().find_map(|p| match p.kind {
        PropertyKind::List { .. } if FACE_LIST_NAMES.contains(&p.name.as_str()) => Some(p.name.as_str()),
        _ => None,
    });
    let Some(list_name) = list_name else {
        return Err(Error::mesh("PLY face element has no vertex_indices list"));
    };

    let mut rows: Vec<Vec<i32>> = Vec::with_capacity(element.count.min(MAX_RESERVE));
    for _ in 0..element.count {
        for prop in &element.properties {
            match prop.kind {
                PropertyKind::List { count, item } if prop.name == list_name => {
                    let n = list_len(values.next(count)?)?;
                    let mut face = Vec::with_capacity(n.min(MAX_RESERVE));
                    for _ in 0..n {
                        face.push(values.next(item)? as i32);
                    }
                    if n < 3 {
                        return Err(Error::mesh(format!("PLY face has {} corners", n)));
                    }
                    rows.push(face);
                }
                PropertyKind::List { count, item } => skip_list(count, item, values)?,
                PropertyKind::Scalar(ty) => {
                    values.next(ty)?;
                }
            }
        }
    }
    Matrix::<i32>::from_rows(rows.as_slice())
        .map_err(|e| Error::mesh(format!("mixed face arity: {}", e)))
}

fn list_len(raw: f64) -> Result<usize> {
    if raw < 0.0 || raw.fract() != 0.0 {
        return Err(Error::mesh(format!("bad PLY list length {}", raw)));
    }
    Ok(raw as usize)
}

fn skip_list<V: Values>(count: Scalar, item: Scalar, values: &mut V) -> Result<()> {
    let n = list_len(values.next(count)?)?;
    for _ in 0..n {
        values.next(item)?;
    }
    Ok(())
}

fn skip_item<V: Values>(element: &Element, values: &mut V) -> Result<()> {
    for prop in &element.properties {
        match prop.kind {
            PropertyKind::Scalar(ty) => {
                values.next(ty)?;
            }
            PropertyKind::List { count, item } => skip_list(count, item, values)?,
        }
    }
    Ok(())
}

/// Decode a PLY stream.
pub fn read_ply<R: Read>(reader: R) -> Result<(Matrix<f32>, Matrix<i32>)> {
    let mut reader = BufReader::new(reader);
    let header = read_header(&mut reader)?;
    debug!(
        "ply: {:?}, elements {:?}",
        header.encoding,
        header.elements.iter().map(|e| (e.name.as_str(), e.count)).collect::<Vec<_>>()
    );

    match header.encoding {
        Encoding::Ascii => {
            let mut body = String::new();
            reader.read_to_string(&mut body)?;
            let mut values = AsciiValues { tokens: body.split_whitespace() };
            decode_body(&header, &mut values)
        }
        Encoding::BinaryLittleEndian => {
            let mut values = BinaryValues::<_, LittleEndian> { reader, _order: PhantomData };
            decode_body(&header, &mut values)
        }
        Encoding::BinaryBigEndian => {
            let mut values = BinaryValues::<_, BigEndian> { reader, _order: PhantomData };
            decode_body(&header, &mut values)
        }
    }
}
