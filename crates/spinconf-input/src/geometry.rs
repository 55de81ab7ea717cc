//! Geometry polygons referenced by material records.
//!
//! A geometry file holds a vertex count `n` followed by `n` coordinate
//! pairs, all separated by arbitrary whitespace. Coordinates are fractions
//! of the system size. Anything after the last pair is ignored.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use crate::error::Reason;

pub const MIN_VERTICES: usize = 3;
pub const MAX_VERTICES: usize = 100;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("file is empty, expected a vertex count")]
    MissingCount,

    #[error("invalid vertex count '{0}'")]
    InvalidCount(String),

    #[error("vertex count {0} must be in the range [3, 100]")]
    CountOutOfRange(i64),

    #[error("expected {expected} vertices but the file ends after {found}")]
    Truncated { expected: usize, found: usize },

    #[error("invalid coordinate '{token}' for vertex {vertex}")]
    InvalidCoordinate { vertex: usize, token: String },

    #[error("coordinate {value} of vertex {vertex} must be in the range [0, 1]")]
    CoordinateOutOfRange { vertex: usize, value: f64 },
}

/// Closed 2-D outline in fractional coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polygon {
    pub vertices: Vec<[f64; 2]>,
}

impl Polygon {
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Parse the contents of a geometry file.
pub fn parse_polygon(source: &str) -> Result<Polygon, GeometryError> {
    let mut tokens = source.split_whitespace();

    let count_token = tokens.next().ok_or(GeometryError::MissingCount)?;
    let count: i64 = count_token
        .parse()
        .map_err(|_| GeometryError::InvalidCount(count_token.to_string()))?;
    let count = usize::try_from(count)
        .ok()
        .filter(|n| (MIN_VERTICES..=MAX_VERTICES).contains(n))
        .ok_or(GeometryError::CountOutOfRange(count))?;

    let mut vertices = Vec::with_capacity(count);
    for vertex in 0..count {
        let mut point = [0.0; 2];
        for coordinate in point.iter_mut() {
            let token = tokens.next().ok_or(GeometryError::Truncated {
                expected: count,
                found: vertex,
            })?;
            let value: f64 = token.parse().map_err(|_| GeometryError::InvalidCoordinate {
                vertex,
                token: token.to_string(),
            })?;
            if !(0.0..=1.0).contains(&value) {
                return Err(GeometryError::CoordinateOutOfRange { vertex, value });
            }
            *coordinate = value;
        }
        vertices.push(point);
    }

    Ok(Polygon { vertices })
}

/// Read and parse a geometry file.
pub fn load_polygon(path: &Path) -> Result<Polygon, Reason> {
    let mut file = File::open(path).map_err(|source| Reason::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|source| Reason::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_polygon(&contents).map_err(|source| Reason::Geometry {
        path: path.to_path_buf(),
        source,
    })
}
