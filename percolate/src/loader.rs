//! External data ingestion contract.
//!
//! Reading a time-series dataset off disk, auto-detecting headers, and
//! parsing NetCDF are all out of scope for this crate (they are collaborators
//! that feed the engine, not part of it). What a loader must provide is
//! captured here as a trait, together with a synthetic implementation used by
//! the CLI demo and by tests that need a procedurally generated field instead
//! of a literal array.

use crate::channel::{ScalarChannel, VolumeChannel};
use crate::error::Result;
use crate::grid::Grid;

/// A source of one (scalar channel, volume channel, grid) triple.
///
/// Implementations are expected to read a directory laid out as one file per
/// vector/scalar component, a 4-digit zero-padded time-slice suffix, and an
/// auto-detected header size in `{0, 4, 8}` bytes inferred from file length
/// versus `Nx*Ny*Nz*8`; none of that I/O is modeled here, only its result.
pub trait RawLoader {
    /// Loads the field at time slice `time_index` (1-based).
    ///
    /// # Errors
    ///
    /// Returns an error if the requested slice cannot be assembled into a
    /// consistent `(scalar, volume, grid)` triple.
    fn load(&self, time_index: usize) -> Result<(ScalarChannel, VolumeChannel, Grid)>;
}

/// Generates a procedural scalar field over a fixed grid, with no file I/O.
///
/// Used by the CLI's demo subcommand and by tests that want a `RawLoader`
/// without standing up a real dataset. The field is a deterministic function
/// of `(x, y, z, time_index)` so repeated loads of the same slice are
/// reproducible.
#[derive(Clone, Copy, Debug)]
pub struct SyntheticLoader {
    grid: Grid,
    seed: u64,
}

impl SyntheticLoader {
    /// A loader producing fields over `grid`, seeded by `seed`.
    #[must_use]
    pub const fn new(grid: Grid, seed: u64) -> Self {
        Self { grid, seed }
    }

    fn value_at(&self, x: usize, y: usize, z: usize, time_index: usize) -> f64 {
        // A cheap deterministic hash-like mix; not cryptographic, just
        // reproducible and spatially varying.
        let mut h = self
            .seed
            .wrapping_add(x as u64)
            .wrapping_mul(0x9E37_79B9_7F4A_7C15)
            .wrapping_add((y as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F))
            .wrapping_add((z as u64).wrapping_mul(0x1656_67B1_9E37_79F9))
            .wrapping_add(time_index as u64);
        h ^= h >> 33;
        h = h.wrapping_mul(0xFF51_AFD7_ED55_8CCD);
        h ^= h >> 33;
        (h % 1_000_007) as f64 / 1_000_006.0
    }
}

impl RawLoader for SyntheticLoader {
    fn load(&self, time_index: usize) -> Result<(ScalarChannel, VolumeChannel, Grid)> {
        let n = self.grid.len();
        let mut values = ndarray::Array1::<f64>::zeros(n);
        for id in 0..n {
            let (x, y, z) = self.grid.coord_of(id);
            values[id] = self.value_at(x, y, z, time_index);
        }
        Ok((
            ScalarChannel::F64(values),
            VolumeChannel::Constant(1.0),
            self.grid,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_loader_is_deterministic_across_calls() {
        let grid = Grid::new((4, 4, 4), (false, false, false));
        let loader = SyntheticLoader::new(grid, 42);
        let (a, _, _) = loader.load(1).unwrap();
        let (b, _, _) = loader.load(1).unwrap();
        let ScalarChannel::F64(a) = a else { panic!("expected f64 channel") };
        let ScalarChannel::F64(b) = b else { panic!("expected f64 channel") };
        assert_eq!(a, b);
    }

    #[test]
    fn synthetic_loader_varies_across_time_slices() {
        let grid = Grid::new((4, 4, 4), (false, false, false));
        let loader = SyntheticLoader::new(grid, 42);
        let (a, _, _) = loader.load(1).unwrap();
        let (b, _, _) = loader.load(2).unwrap();
        let ScalarChannel::F64(a) = a else { panic!("expected f64 channel") };
        let ScalarChannel::F64(b) = b else { panic!("expected f64 channel") };
        assert_ne!(a, b);
    }

    #[test]
    fn synthetic_loader_grid_matches_configured_dims() {
        let grid = Grid::new((2, 3, 5), (false, false, false));
        let loader = SyntheticLoader::new(grid, 7);
        let (_, _, out_grid) = loader.load(1).unwrap();
        assert_eq!(out_grid.dims(), (2, 3, 5));
    }
}
