//! End-to-end scenarios against the public API, one per distilled example.

use ndarray::Array1;
use percolate::{Config, PercDim, SampleMode, ScalarChannel, StatCache, VolumeChannel, WindowMode};

fn voxel_config(num_samples: usize) -> Config {
    Config {
        sample_mode: SampleMode::VoxelBased,
        num_samples,
        window_mode: WindowMode::PercentOfEnds {
            percentage: 0.0,
            cut_both_ends: false,
        },
        perc_dim: PercDim::X,
        snapshot_at: None,
        stop_early: false,
        run_id: 0,
    }
}

#[test]
fn s1_tiny_one_d_chain() {
    let grid = percolate::Grid::new((4, 1, 1), (false, false, false));
    let scalar = ScalarChannel::F64(Array1::from(vec![3.0, 1.0, 2.0, 4.0]));
    let volume = VolumeChannel::Constant(1.0);
    let config = voxel_config(4);
    let mut cache = StatCache::new();

    let out = percolate::run(&scalar, &volume, &grid, &config, &mut cache);
    let rows: Vec<_> = out
        .table
        .rows()
        .iter()
        .map(|r| (r.h, r.num_comps, r.total_vol, r.largest_vol, r.is_percolating))
        .collect();
    assert_eq!(
        rows,
        vec![
            (4.0, 1, 1.0, 1.0, 0),
            (3.0, 2, 2.0, 1.0, 0),
            (2.0, 2, 3.0, 2.0, 0),
            (1.0, 1, 4.0, 4.0, 1),
        ]
    );
}

#[test]
fn s2_isolated_plateau() {
    let grid = percolate::Grid::new((3, 1, 1), (false, false, false));
    let scalar = ScalarChannel::F64(Array1::from(vec![5.0, 5.0, 5.0]));
    let volume = VolumeChannel::Constant(1.0);
    let config = voxel_config(3);
    let mut cache = StatCache::new();

    let out = percolate::run(&scalar, &volume, &grid, &config, &mut cache);
    let largest: Vec<_> = out.table.rows().iter().map(|r| r.largest_vol).collect();
    assert_eq!(largest, vec![1.0, 2.0, 3.0]);
    assert_eq!(out.table.rows().last().unwrap().is_percolating, 1);
}

#[test]
fn s3_periodic_ring() {
    let grid = percolate::Grid::new((4, 1, 1), (true, false, false));
    let scalar = ScalarChannel::F64(Array1::from(vec![1.0, 2.0, 3.0, 4.0]));
    let volume = VolumeChannel::Constant(1.0);
    let config = voxel_config(4);
    let mut cache = StatCache::new();

    let out = percolate::run(&scalar, &volume, &grid, &config, &mut cache);
    let last = out.table.rows().last().unwrap();
    assert_eq!(last.num_comps, 1);
    assert_eq!(last.is_percolating, 1);
}

#[test]
fn s4_value_based_resampling() {
    let grid = percolate::Grid::new((2, 1, 1), (false, false, false));
    let scalar = ScalarChannel::F64(Array1::from(vec![10.0, 0.0]));
    let volume = VolumeChannel::Constant(1.0);
    let config = Config {
        sample_mode: SampleMode::ValueBased,
        num_samples: 5,
        window_mode: WindowMode::Absolute { h_min: 0.0, h_max: 10.0 },
        perc_dim: PercDim::X,
        snapshot_at: None,
        stop_early: false,
        run_id: 0,
    };
    let mut cache = StatCache::new();

    let out = percolate::run(&scalar, &volume, &grid, &config, &mut cache);
    let thresholds: Vec<_> = out.table.rows().iter().map(|r| r.h).collect();
    assert_eq!(thresholds, vec![10.0, 7.5, 5.0, 2.5, 0.0]);
}

#[test]
fn s5_snapshot_and_stop_early() {
    let grid = percolate::Grid::new((4, 1, 1), (false, false, false));
    let scalar = ScalarChannel::F64(Array1::from(vec![3.0, 1.0, 2.0, 4.0]));
    let volume = VolumeChannel::Constant(1.0);
    let mut config = voxel_config(4);
    config.snapshot_at = Some(2);
    config.stop_early = true;
    let mut cache = StatCache::new();

    let out = percolate::run(&scalar, &volume, &grid, &config, &mut cache);
    assert_eq!(out.table.len(), 3);
    let snap = out.snapshot.expect("snapshot should have been taken");
    let rec = snap
        .clusters
        .iter()
        .find(|c| c.size_x == 2)
        .expect("a size-2 cluster should be present");
    assert_eq!(rec.size_x, 2);
}

#[test]
fn s6_sentinel_exclusion() {
    let grid = percolate::Grid::new((3, 1, 1), (false, false, false));
    let scalar = ScalarChannel::F64(Array1::from(vec![f64::NEG_INFINITY, 1.0, 2.0]));
    let volume = VolumeChannel::Constant(1.0);
    let config = voxel_config(2);
    let mut cache = StatCache::new();

    let out = percolate::run(&scalar, &volume, &grid, &config, &mut cache);
    assert_eq!(out.table.len(), 2);

    let mut cfg = config;
    cfg.snapshot_at = Some(1);
    let mut snap_cache = StatCache::new();
    let snap = percolate::run(&scalar, &volume, &grid, &cfg, &mut snap_cache)
        .snapshot
        .unwrap();
    assert_eq!(snap.labels[0], -1);
}
