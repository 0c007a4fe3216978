//! Fixed four-slot shape descriptor

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

/// Extents of an array along up to four axes.
///
/// Trailing unspecified dimensions default to 1, so a length-5 vector is
/// `[5, 1, 1, 1]` and a 2x3 matrix is `[2, 3, 1, 1]`. Used both as a
/// construction parameter and as an introspection result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dim4 {
    dims: [u64; 4],
}

impl Dim4 {
    pub fn new(dims: [u64; 4]) -> Self {
        Self { dims }
    }

    /// Number of significant dimensions.
    ///
    /// 0 for an empty shape, 1 for a single element, otherwise the index of
    /// the last non-unit slot plus one.
    pub fn ndims(&self) -> u32 {
        match self.elements() {
            0 => 0,
            1 => 1,
            _ => {
                if self.dims[3] != 1 {
                    4
                } else if self.dims[2] != 1 {
                    3
                } else if self.dims[1] != 1 {
                    2
                } else {
                    1
                }
            }
        }
    }

    /// Total number of elements described by this shape.
    pub fn elements(&self) -> u64 {
        self.dims.iter().product()
    }

    /// All four slots, including trailing units.
    pub fn get(&self) -> &[u64; 4] {
        &self.dims
    }
}

impl Default for Dim4 {
    /// A single-element shape: `[1, 1, 1, 1]`.
    fn default() -> Self {
        Self { dims: [1; 4] }
    }
}

impl From<u64> for Dim4 {
    fn from(d0: u64) -> Self {
        Self::new([d0, 1, 1, 1])
    }
}

impl From<(u64, u64)> for Dim4 {
    fn from((d0, d1): (u64, u64)) -> Self {
        Self::new([d0, d1, 1, 1])
    }
}

impl From<(u64, u64, u64)> for Dim4 {
    fn from((d0, d1, d2): (u64, u64, u64)) -> Self {
        Self::new([d0, d1, d2, 1])
    }
}

impl From<(u64, u64, u64, u64)> for Dim4 {
    fn from((d0, d1, d2, d3): (u64, u64, u64, u64)) -> Self {
        Self::new([d0, d1, d2, d3])
    }
}

impl From<[u64; 4]> for Dim4 {
    fn from(dims: [u64; 4]) -> Self {
        Self::new(dims)
    }
}

impl Index<usize> for Dim4 {
    type Output = u64;

    fn index(&self, index: usize) -> &u64 {
        &self.dims[index]
    }
}

impl IndexMut<usize> for Dim4 {
    fn index_mut(&mut self, index: usize) -> &mut u64 {
        &mut self.dims[index]
    }
}

impl fmt::Display for Dim4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{} {} {} {}]",
            self.dims[0], self.dims[1], self.dims[2], self.dims[3]
        )
    }
}
