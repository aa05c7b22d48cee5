//! Binary vector artifact: reader and writer
//!
//! Layout: 4-byte magic `CVIX`, then format version, entry count and vector
//! dimension as little-endian u32, then `count * dimension` little-endian
//! f32 values. The writer lives next to the reader so the offline build
//! pipeline and the service loader can never drift apart.

use std::fs;
use std::path::Path;

use cora_core::{Error, Result};

const MAGIC: &[u8; 4] = b"CVIX";
const HEADER_LEN: usize = 16;

/// Current artifact format version.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug)]
pub(crate) struct RawVectors {
    pub dimension: usize,
    pub count: usize,
    /// Row-major, `count * dimension` values.
    pub data: Vec<f32>,
}

pub(crate) fn read_artifact(path: &Path) -> Result<RawVectors> {
    let bytes = fs::read(path)?;

    if bytes.len() < HEADER_LEN {
        return Err(Error::CorruptIndex(format!(
            "{}: file too short for header ({} bytes)",
            path.display(),
            bytes.len()
        )));
    }
    if &bytes[0..4] != MAGIC {
        return Err(Error::CorruptIndex(format!(
            "{}: bad magic, not a cora vector artifact",
            path.display()
        )));
    }

    let version = read_u32(&bytes, 4);
    if version != FORMAT_VERSION {
        return Err(Error::CorruptIndex(format!(
            "{}: unsupported format version {version}",
            path.display()
        )));
    }

    let count = read_u32(&bytes, 8) as usize;
    let dimension = read_u32(&bytes, 12) as usize;
    if dimension == 0 {
        return Err(Error::CorruptIndex(format!(
            "{}: zero vector dimension",
            path.display()
        )));
    }

    let expected = HEADER_LEN + count * dimension * 4;
    if bytes.len() != expected {
        return Err(Error::CorruptIndex(format!(
            "{}: payload is {} bytes, header promises {}",
            path.display(),
            bytes.len(),
            expected
        )));
    }

    let data = bytes[HEADER_LEN..]
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();

    Ok(RawVectors {
        dimension,
        count,
        data,
    })
}

/// Write a vector artifact. All vectors must share one dimension.
///
/// Used by the offline index builder and by tests; the service itself only
/// ever reads.
pub fn write_artifact(path: &Path, vectors: &[Vec<f32>]) -> Result<()> {
    let dimension = match vectors.first() {
        Some(first) => first.len(),
        None => {
            return Err(Error::InvalidInput(
                "refusing to write an empty vector artifact".to_string(),
            ))
        }
    };
    if dimension == 0 {
        return Err(Error::InvalidInput(
            "vectors must have a non-zero dimension".to_string(),
        ));
    }
    if let Some(bad) = vectors.iter().find(|v| v.len() != dimension) {
        return Err(Error::InvalidInput(format!(
            "inconsistent vector dimensions: expected {dimension}, found {}",
            bad.len()
        )));
    }

    let mut bytes = Vec::with_capacity(HEADER_LEN + vectors.len() * dimension * 4);
    bytes.extend_from_slice(MAGIC);
    bytes.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
    bytes.extend_from_slice(&(vectors.len() as u32).to_le_bytes());
    bytes.extend_from_slice(&(dimension as u32).to_le_bytes());
    for vector in vectors {
        for value in vector {
            bytes.extend_from_slice(&value.to_le_bytes());
        }
    }

    fs::write(path, bytes)?;
    Ok(())
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}
