//! Local/global classification of clusters against a block partition.

use crate::extent::Extent;
use crate::grid::Grid;
use crate::snapshot::ClusterSnapshot;
use ndarray::Array1;
use rustc_hash::FxHashMap;

/// Output of classifying a [`ClusterSnapshot`] against a block partition.
#[derive(Clone, Debug)]
pub struct LocalGlobalClassifier {
    /// Per-vertex signed cluster class: `0` unset, `-1` local, `+1` global.
    pub cluster_class: Array1<f64>,
    /// Per-vertex signed positional class: `-1` if the vertex itself sits in
    /// the local interior of its own block, `+1` otherwise. Defined for every
    /// vertex, independent of cluster membership.
    pub position_class: Array1<f64>,
    /// `100 * globalClusterCount / (localClusterCount + globalClusterCount)`.
    pub global_cluster_fraction: f64,
    /// `100 * globalVoxelCount / (localVoxelCount + globalVoxelCount)`, over
    /// labeled (active) voxels only.
    pub global_voxel_fraction: f64,
}

/// Shrinks a block's bounds to its interior: the side facing away from the
/// lattice boundary is pulled in by one voxel on the low side and two on the
/// high side (to make both bounds exclusive-safe for inclusive extents).
fn block_interior(block_idx_lower: [usize; 3], block_size: [usize; 3], total_size: [usize; 3]) -> ([i64; 3], [i64; 3]) {
    let mut lower = [0_i64; 3];
    let mut upper = [0_i64; 3];
    for dim in 0..3 {
        let lo = block_idx_lower[dim] * block_size[dim];
        let hi = lo + block_size[dim];
        lower[dim] = lo as i64;
        upper[dim] = hi as i64;
        if lower[dim] > 0 {
            lower[dim] += 1;
        }
        if (hi) < total_size[dim] {
            upper[dim] -= 2;
        }
    }
    (lower, upper)
}

fn is_cluster_local(extent: &Extent, block_size: [usize; 3], total_size: [usize; 3]) -> bool {
    let min = extent.min().expect("live cluster has a non-empty extent");
    let max = extent.max().expect("live cluster has a non-empty extent");
    let min = [min.0, min.1, min.2];
    let max = [max.0, max.1, max.2];

    let block_idx_lower = [
        min[0] as usize / block_size[0],
        min[1] as usize / block_size[1],
        min[2] as usize / block_size[2],
    ];
    let block_idx_upper = [
        max[0] as usize / block_size[0],
        max[1] as usize / block_size[1],
        max[2] as usize / block_size[2],
    ];
    if block_idx_lower != block_idx_upper {
        return false;
    }

    let (lower, upper) = block_interior(block_idx_lower, block_size, total_size);
    (0..3).all(|dim| lower[dim] <= min[dim] && upper[dim] >= max[dim])
}

fn is_position_local(coord: (usize, usize, usize), block_size: [usize; 3], total_size: [usize; 3]) -> bool {
    let coord = [coord.0, coord.1, coord.2];
    let block_idx_lower = [
        coord[0] / block_size[0],
        coord[1] / block_size[1],
        coord[2] / block_size[2],
    ];
    let (lower, upper) = block_interior(block_idx_lower, block_size, total_size);
    (0..3).all(|dim| lower[dim] <= coord[dim] as i64 && upper[dim] >= coord[dim] as i64)
}

/// Classifies every cluster in `snapshot` as local or global against
/// `block_size`, and every vertex's own position as well.
///
/// # Panics
///
/// Panics if any component of `block_size` is zero.
#[must_use]
pub fn classify(snapshot: &ClusterSnapshot, grid: &Grid, block_size: (usize, usize, usize)) -> LocalGlobalClassifier {
    assert!(
        block_size.0 > 0 && block_size.1 > 0 && block_size.2 > 0,
        "block size must be positive on every axis"
    );
    let block_size = [block_size.0, block_size.1, block_size.2];
    let dims = grid.dims();
    let total_size = [dims.0, dims.1, dims.2];

    let mut is_local_of: FxHashMap<i64, bool> = FxHashMap::default();
    let mut num_local_clusters = 0_i64;
    let mut num_global_clusters = 0_i64;
    for &(rep, extent) in &snapshot.extents {
        let local = is_cluster_local(&extent, block_size, total_size);
        is_local_of.insert(rep, local);
        if local {
            num_local_clusters += 1;
        } else {
            num_global_clusters += 1;
        }
    }

    let n = snapshot.labels.len();
    let mut cluster_class = Array1::zeros(n);
    let mut position_class = Array1::zeros(n);
    let mut num_local_voxels = 0_i64;
    let mut num_global_voxels = 0_i64;

    for id in 0..n {
        let label = snapshot.labels[id];
        if label >= 0 {
            let local = is_local_of[&label];
            cluster_class[id] = if local { -1.0 } else { 1.0 };
            if local {
                num_local_voxels += 1;
            } else {
                num_global_voxels += 1;
            }
        }

        let coord = grid.coord_of(id);
        position_class[id] = if is_position_local(coord, block_size, total_size) {
            -1.0
        } else {
            1.0
        };
    }

    let cluster_denom = num_local_clusters + num_global_clusters;
    let global_cluster_fraction = if cluster_denom == 0 {
        0.0
    } else {
        100.0 * num_global_clusters as f64 / cluster_denom as f64
    };

    let voxel_denom = num_local_voxels + num_global_voxels;
    let global_voxel_fraction = if voxel_denom == 0 {
        0.0
    } else {
        100.0 * num_global_voxels as f64 / voxel_denom as f64
    };

    LocalGlobalClassifier {
        cluster_class,
        position_class,
        global_cluster_fraction,
        global_voxel_fraction,
    }
}
