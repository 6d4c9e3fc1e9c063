//! Regular 3D scalar grids.
//!
//! A [`Cube`] samples a scalar field (electron density, an orbital) on an
//! axis-aligned lattice. Samples live in one flat buffer ordered with x as
//! the slowest axis and z as the fastest, so the sample at grid point
//! `(i, j, k)` sits at `(i * ny + j) * nz + k`.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("sample buffer holds {actual} values but the grid needs {expected}")]
pub struct DataLengthError {
    pub expected: usize,
    pub actual: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cube {
    min: [f64; 3],
    spacing: [f64; 3],
    dimensions: [usize; 3],
    data: Vec<f32>,
    orbital: Option<u32>,
}

impl Cube {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places the grid: `min` is the position of sample `(0, 0, 0)` and
    /// `spacing` the step along each axis, both in Å.
    ///
    /// Any previously stored samples are dropped, since they no longer match
    /// the new shape.
    pub fn set_limits(&mut self, min: [f64; 3], dimensions: [usize; 3], spacing: [f64; 3]) {
        self.min = min;
        self.dimensions = dimensions;
        self.spacing = spacing;
        self.data.clear();
    }

    pub fn set_data(&mut self, data: Vec<f32>) -> Result<(), DataLengthError> {
        let expected = self.point_count();
        if data.len() != expected {
            return Err(DataLengthError {
                expected,
                actual: data.len(),
            });
        }
        self.data = data;
        Ok(())
    }

    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    pub fn min(&self) -> [f64; 3] {
        self.min
    }

    /// Position of the last grid point.
    pub fn max(&self) -> [f64; 3] {
        let [nx, ny, nz] = self.dimensions;
        self.position(nx.saturating_sub(1), ny.saturating_sub(1), nz.saturating_sub(1))
    }

    #[inline]
    pub fn spacing(&self) -> [f64; 3] {
        self.spacing
    }

    #[inline]
    pub fn dimensions(&self) -> [usize; 3] {
        self.dimensions
    }

    #[inline]
    pub fn point_count(&self) -> usize {
        self.dimensions.iter().product()
    }

    /// Orbital index this grid was labelled with in a multi-cube file.
    #[inline]
    pub fn orbital(&self) -> Option<u32> {
        self.orbital
    }

    #[inline]
    pub fn set_orbital(&mut self, orbital: Option<u32>) {
        self.orbital = orbital;
    }

    pub fn index(&self, i: usize, j: usize, k: usize) -> Option<usize> {
        let [nx, ny, nz] = self.dimensions;
        if i >= nx || j >= ny || k >= nz {
            return None;
        }
        Some((i * ny + j) * nz + k)
    }

    pub fn value(&self, i: usize, j: usize, k: usize) -> Option<f32> {
        self.index(i, j, k).and_then(|idx| self.data.get(idx).copied())
    }

    pub fn position(&self, i: usize, j: usize, k: usize) -> [f64; 3] {
        [
            self.min[0] + i as f64 * self.spacing[0],
            self.min[1] + j as f64 * self.spacing[1],
            self.min[2] + k as f64 * self.spacing[2],
        ]
    }

    /// Smallest and largest finite sample, or `None` when there are none.
    pub fn value_range(&self) -> Option<(f32, f32)> {
        self.data
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |range, v| match range {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}
