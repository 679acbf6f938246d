//! A 3-D axis-aligned structured lattice with optional per-axis periodicity.

use arrayvec::ArrayVec;

/// Dimension a percolation test is evaluated against.
#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum PercDim {
    /// Percolates along x only.
    X,
    /// Percolates along y only.
    Y,
    /// Percolates along z only.
    Z,
    /// Percolates along any non-degenerate axis.
    Any,
    /// Percolates along every non-degenerate axis.
    All,
}

/// A structured 3-D grid of `Nx * Ny * Nz` vertices, z-major linearized.
#[derive(Clone, Copy, Debug)]
pub struct Grid {
    dims: (usize, usize, usize),
    periodic: (bool, bool, bool),
}

impl Grid {
    /// Builds a grid with the given per-axis vertex counts and periodicity
    /// flags.
    #[must_use]
    pub const fn new(dims: (usize, usize, usize), periodic: (bool, bool, bool)) -> Self {
        Self { dims, periodic }
    }

    /// Per-axis vertex counts `(Nx, Ny, Nz)`.
    #[must_use]
    pub const fn dims(&self) -> (usize, usize, usize) {
        self.dims
    }

    /// Per-axis periodicity flags.
    #[must_use]
    pub const fn periodic(&self) -> (bool, bool, bool) {
        self.periodic
    }

    /// Total number of vertices `Nx * Ny * Nz`.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.dims.0 * self.dims.1 * self.dims.2
    }

    /// Whether this grid has zero vertices.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Linearizes `(x, y, z)` into a vertex id.
    #[must_use]
    pub const fn linear_of(&self, x: usize, y: usize, z: usize) -> usize {
        x + self.dims.0 * (y + self.dims.1 * z)
    }

    /// Recovers `(x, y, z)` from a vertex id.
    ///
    /// # Panics
    ///
    /// Panics if `id >= self.len()`.
    #[must_use]
    pub fn coord_of(&self, id: usize) -> (usize, usize, usize) {
        assert!(id < self.len(), "vertex id {id} out of range");
        let (nx, ny, _) = self.dims;
        let x = id % nx;
        let y = (id / nx) % ny;
        let z = id / (nx * ny);
        (x, y, z)
    }

    /// The up-to-six axis-aligned neighbors of `id`, wrapping on periodic
    /// axes and omitting off-grid neighbors on non-periodic axes.
    #[must_use]
    pub fn neighbors(&self, id: usize) -> ArrayVec<usize, 6> {
        let (x, y, z) = self.coord_of(id);
        let (nx, ny, nz) = self.dims;
        let (px, py, pz) = self.periodic;

        let mut out = ArrayVec::new();
        Self::push_axis_neighbors(&mut out, x, nx, px, |v| self.linear_of(v, y, z));
        Self::push_axis_neighbors(&mut out, y, ny, py, |v| self.linear_of(x, v, z));
        Self::push_axis_neighbors(&mut out, z, nz, pz, |v| self.linear_of(x, y, v));
        out
    }

    fn push_axis_neighbors(
        out: &mut ArrayVec<usize, 6>,
        coord: usize,
        n: usize,
        periodic: bool,
        to_id: impl Fn(usize) -> usize,
    ) {
        if n <= 1 {
            return;
        }

        if coord > 0 {
            out.push(to_id(coord - 1));
        } else if periodic {
            out.push(to_id(n - 1));
        }

        // On a periodic axis of length 2, the two vertices are already each
        // other's "previous" neighbor via wraparound above; counting them
        // again as "next" would duplicate the same edge.
        if periodic && n == 2 {
            return;
        }

        if coord + 1 < n {
            out.push(to_id(coord + 1));
        } else if periodic {
            out.push(to_id(0));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_and_coord_round_trip() {
        let grid = Grid::new((4, 3, 2), (false, false, false));
        for z in 0..2 {
            for y in 0..3 {
                for x in 0..4 {
                    let id = grid.linear_of(x, y, z);
                    assert_eq!(grid.coord_of(id), (x, y, z));
                }
            }
        }
    }

    #[test]
    fn non_periodic_boundary_has_fewer_neighbors() {
        let grid = Grid::new((4, 1, 1), (false, false, false));
        assert_eq!(grid.neighbors(0).len(), 1);
        assert_eq!(grid.neighbors(3).len(), 1);
        assert_eq!(grid.neighbors(1).len(), 2);
    }

    #[test]
    fn periodic_axis_wraps_around() {
        let grid = Grid::new((4, 1, 1), (true, false, false));
        let n = grid.neighbors(0);
        assert!(n.contains(&3));
        assert!(n.contains(&1));
        assert_eq!(n.len(), 2);
    }

    #[test]
    fn periodic_axis_of_length_two_does_not_double_count() {
        let grid = Grid::new((2, 1, 1), (true, false, false));
        let n0 = grid.neighbors(0);
        assert_eq!(n0.len(), 1);
        assert_eq!(n0[0], 1);
        let n1 = grid.neighbors(1);
        assert_eq!(n1.len(), 1);
        assert_eq!(n1[0], 0);
    }

    #[test]
    fn degenerate_axis_contributes_no_neighbors() {
        let grid = Grid::new((4, 1, 1), (true, true, true));
        // y and z axes have size 1, so periodicity there is a no-op.
        assert_eq!(grid.neighbors(0).len(), 2);
    }
}
