//! N-dimensional grid indexing
//!
//! Maps cell coordinates to a flat index and back, first axis varying
//! fastest (axis `i` has offset `shape[0] * ... * shape[i - 1]`).

use crate::error::{GraphError, GraphResult};
use std::ops::Range;

/// Finite grid with a fixed number of cells along each axis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    shape: Vec<usize>,
    offsets: Vec<usize>,
    len: usize,
}

impl Grid {
    /// Build a grid with `shape[i]` cells along axis `i`
    ///
    /// Fails with [`GraphError::ShapeOverflow`] when the number of cells
    /// does not fit in a `usize`.
    pub fn new(shape: impl IntoIterator<Item = usize>) -> GraphResult<Self> {
        let shape: Vec<usize> = shape.into_iter().collect();

        // Nothing to address: index and coordinates always fail
        if shape.is_empty() || shape.contains(&0) {
            return Ok(Grid {
                offsets: vec![0; shape.len()],
                shape,
                len: 0,
            });
        }

        let mut offsets = Vec::with_capacity(shape.len());
        let mut stride = 1usize;
        for &extent in &shape {
            offsets.push(stride);
            stride = match stride.checked_mul(extent) {
                Some(next) => next,
                None => {
                    return Err(GraphError::ShapeOverflow {
                        shape: shape.clone(),
                    })
                }
            };
        }

        Ok(Grid {
            shape,
            offsets,
            len: stride,
        })
    }

    /// Number of axes
    pub fn dim(&self) -> usize {
        self.shape.len()
    }

    /// Number of cells along each axis
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate on the index of every cell
    pub fn indices(&self) -> Range<usize> {
        0..self.len
    }

    /// Flat index of the cell at `coord`; inverse of [`Grid::coordinates`]
    pub fn index(&self, coord: &[usize]) -> GraphResult<usize> {
        if coord.len() != self.dim() {
            return Err(GraphError::DimensionMismatch {
                expected: self.dim(),
                got: coord.len(),
            });
        }

        if self.is_empty() {
            return Err(GraphError::OutOfRange {
                what: "index",
                value: 0,
                bound: 0,
            });
        }

        // Bounded by len - 1, so the sum cannot overflow
        let mut index = 0;
        for (axis, (&value, &extent)) in coord.iter().zip(&self.shape).enumerate() {
            if value >= extent {
                return Err(GraphError::OutOfRange {
                    what: "coordinate",
                    value,
                    bound: extent,
                });
            }
            index += value * self.offsets[axis];
        }
        Ok(index)
    }

    /// Coordinates of the cell at flat `index`; inverse of [`Grid::index`]
    pub fn coordinates(&self, index: usize) -> GraphResult<Vec<usize>> {
        if index >= self.len {
            return Err(GraphError::OutOfRange {
                what: "index",
                value: index,
                bound: self.len,
            });
        }

        let mut coord = vec![0; self.dim()];
        let mut residue = index;
        for axis in (0..self.dim()).rev() {
            coord[axis] = residue / self.offsets[axis];
            residue %= self.offsets[axis];
        }
        Ok(coord)
    }
}
