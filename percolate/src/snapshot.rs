//! Frozen per-vertex and per-cluster state at a designated sample.

use crate::arena::ComponentArena;
use crate::extent::Extent;
use crate::union_find::UnionFind;
use ndarray::Array1;

/// One row of the per-cluster record table.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ClusterRecord {
    /// Representative id of this cluster.
    pub id: i64,
    /// Total wetted volume of this cluster.
    pub volume: f64,
    /// Bounding-box side length along x.
    pub size_x: i64,
    /// Bounding-box side length along y.
    pub size_y: i64,
    /// Bounding-box side length along z.
    pub size_z: i64,
    /// `size_x * size_y * size_z`.
    pub size_bbox: i64,
}

/// A frozen snapshot of cluster membership, taken at most once per sweep.
#[derive(Clone, Debug)]
pub struct ClusterSnapshot {
    /// `labels[id] == find(id)` at the time of the snapshot, or `-1` if `id`
    /// was never activated.
    pub labels: Array1<i64>,
    /// `1.0` where `labels[id]` is the largest component's representative.
    pub largest_mask: Array1<f64>,
    /// `0.0` unset, `-1.0` in the largest component, `+1.0` elsewhere.
    pub triple_mask: Array1<f64>,
    /// One record per live representative, in ascending rep-id order.
    pub clusters: Vec<ClusterRecord>,
    /// The threshold H at which this snapshot was taken.
    pub threshold: f64,
    /// `(rep id, extent)` for every live representative, in the same order as
    /// `clusters`. Not part of the public table schema; consumed by
    /// [`crate::classifier`].
    pub(crate) extents: Vec<(i64, Extent)>,
}

/// Freezes the current sweep state into a [`ClusterSnapshot`].
///
/// `uf` is queried (and path-compressed) for every vertex id in `0..n`.
pub(crate) fn capture(
    uf: &mut UnionFind,
    arena: &ComponentArena,
    max_volume_rep: Option<usize>,
    threshold: f64,
) -> ClusterSnapshot {
    let n = uf.capacity();
    let mut labels = Array1::from_elem(n, -1_i64);
    for (id, label) in labels.iter_mut().enumerate() {
        *label = uf.find(id);
    }

    let mut largest_mask = Array1::zeros(n);
    let mut triple_mask = Array1::zeros(n);
    if let Some(rep) = max_volume_rep {
        let rep = rep as i64;
        for id in 0..n {
            let label = labels[id];
            if label < 0 {
                continue;
            }
            if label == rep {
                largest_mask[id] = 1.0;
                triple_mask[id] = -1.0;
            } else {
                triple_mask[id] = 1.0;
            }
        }
    }

    let mut clusters: Vec<ClusterRecord> = (0..n)
        .filter(|&rep| arena.is_present(rep))
        .map(|rep| {
            let extent = arena.extent(rep);
            let (size_x, size_y, size_z) = extent.sizes();
            ClusterRecord {
                id: rep as i64,
                volume: arena.volume(rep),
                size_x,
                size_y,
                size_z,
                size_bbox: size_x * size_y * size_z,
            }
        })
        .collect();
    clusters.sort_unstable_by_key(|r| r.id);

    let extents = clusters
        .iter()
        .map(|r| (r.id, *arena.extent(r.id as usize)))
        .collect();

    ClusterSnapshot {
        labels,
        largest_mask,
        triple_mask,
        clusters,
        threshold,
        extents,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extent::Extent;

    #[test]
    fn triple_mask_marks_largest_component_negative() {
        let mut uf = UnionFind::new(3);
        uf.make_set(0);
        uf.make_set(1);
        uf.union(1, 0);
        uf.make_set(2);

        let mut arena = ComponentArena::new(3);
        let rep01 = uf.find(0) as usize;
        arena.create(rep01, 2.0, (0, 0, 0));
        arena.extend_extent(rep01, (1, 0, 0));
        arena.create(2, 1.0, (2, 0, 0));

        let snap = capture(&mut uf, &arena, Some(rep01), 1.0);
        assert_eq!(snap.triple_mask[rep01], -1.0);
        assert_eq!(snap.triple_mask[2], 1.0);
        assert_eq!(snap.largest_mask[rep01], 1.0);
        assert_eq!(snap.clusters.len(), 2);
    }

    #[test]
    fn unset_vertices_carry_label_minus_one() {
        let mut uf = UnionFind::new(2);
        uf.make_set(0);
        let arena = ComponentArena::new(2);
        let _ = Extent::empty();
        let snap = capture(&mut uf, &arena, None, 0.0);
        assert_eq!(snap.labels[1], -1);
        assert_eq!(snap.triple_mask[1], 0.0);
    }
}
