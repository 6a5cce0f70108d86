//! The 3D grid shape shared by every buffer in a coupled model.
//!
//! All field data is stored flat in row-major order: depth (`nz`) is the
//! slowest axis, columns (`nx`) the fastest. [`GridShape::linear_index`]
//! is the single place that linearisation is written down.

use std::fmt;

use crate::error::GridError;

/// Extents of a `(nz, ny, nx)` grid.
///
/// Extents may be zero; a zero-extent grid has no cells and every
/// per-cell operation over it is a no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridShape {
    /// Number of vertical levels (slowest axis).
    pub nz: usize,
    /// Number of rows.
    pub ny: usize,
    /// Number of columns (fastest axis).
    pub nx: usize,
}

impl GridShape {
    /// Create a new grid shape.
    pub const fn new(nz: usize, ny: usize, nx: usize) -> Self {
        Self { nz, ny, nx }
    }

    /// Total number of cells, or [`GridError::CellCountOverflow`] if
    /// `nz * ny * nx` does not fit in `usize`.
    pub fn try_cell_count(&self) -> Result<usize, GridError> {
        self.nz
            .checked_mul(self.ny)
            .and_then(|n| n.checked_mul(self.nx))
            .ok_or(GridError::CellCountOverflow { shape: *self })
    }

    /// Total number of cells, `nz * ny * nx`.
    ///
    /// Callers that accept user-supplied extents should go through
    /// [`try_cell_count`](Self::try_cell_count) first.
    pub fn cell_count(&self) -> usize {
        self.nz * self.ny * self.nx
    }

    /// Returns `true` if any extent is zero.
    pub fn is_empty(&self) -> bool {
        self.nz == 0 || self.ny == 0 || self.nx == 0
    }

    /// Row-major offset of cell `(i, j, k)`: `k + nx * (j + ny * i)`.
    ///
    /// `i` indexes depth, `j` rows and `k` columns. No bounds check is
    /// performed; out-of-range indices produce an offset outside
    /// `0..cell_count()`.
    #[inline]
    pub fn linear_index(&self, i: usize, j: usize, k: usize) -> usize {
        k + self.nx * (j + self.ny * i)
    }

    /// Iterate over every `(i, j, k)` in the grid, in storage order.
    pub fn cells(&self) -> Cells {
        Cells {
            shape: *self,
            next: if self.is_empty() { None } else { Some((0, 0, 0)) },
        }
    }
}

impl fmt::Display for GridShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.nz, self.ny, self.nx)
    }
}

/// Iterator over grid cells returned by [`GridShape::cells`].
#[derive(Clone, Debug)]
pub struct Cells {
    shape: GridShape,
    next: Option<(usize, usize, usize)>,
}

impl Iterator for Cells {
    type Item = (usize, usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (i, j, k) = self.next?;
        self.next = if k + 1 < self.shape.nx {
            Some((i, j, k + 1))
        } else if j + 1 < self.shape.ny {
            Some((i, j + 1, 0))
        } else if i + 1 < self.shape.nz {
            Some((i + 1, 0, 0))
        } else {
            None
        };
        Some((i, j, k))
    }
}
