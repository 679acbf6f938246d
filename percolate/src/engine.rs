//! The threshold sweep: the core of this crate.

use crate::arena::ComponentArena;
use crate::channel::{Scalar, ScalarChannel, VolumeChannel};
use crate::config::{Config, SampleMode, WindowMode};
use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::snapshot::{self, ClusterSnapshot};
use crate::stats::{CacheRow, StatCache, StatsTable};
use crate::union_find::UnionFind;
use arrayvec::ArrayVec;
use ndarray::Array1;
use rayon::prelude::*;

/// The result of one call to [`run`] or [`try_run`]: the emitted rows, plus a
/// [`ClusterSnapshot`] if `config.snapshot_at` was reached.
#[derive(Clone, Debug, Default)]
pub struct EngineOutput {
    /// Rows emitted by this call, in strictly decreasing threshold order.
    pub table: StatsTable,
    /// Present iff the sweep reached `config.snapshot_at`.
    pub snapshot: Option<ClusterSnapshot>,
}

impl EngineOutput {
    fn empty() -> Self {
        Self::default()
    }
}

fn validate(scalar: &ScalarChannel, volume: &VolumeChannel, grid: &Grid, config: &Config) -> Result<()> {
    config.validate()?;

    let n = grid.len();
    let volume_len = volume.len().unwrap_or(n);
    if scalar.len() != n {
        return Err(Error::GridMismatch {
            scalar_len: scalar.len(),
            volume_len,
        });
    }
    if let Some(vol_len) = volume.len() {
        if vol_len != n {
            return Err(Error::GridMismatch {
                scalar_len: n,
                volume_len: vol_len,
            });
        }
    }

    Ok(())
}

/// Runs one threshold sweep, logging and degrading to an empty result on
/// validation failure instead of propagating an error. See [`try_run`] for a
/// variant that surfaces the failure reason.
#[must_use]
pub fn run(scalar: &ScalarChannel, volume: &VolumeChannel, grid: &Grid, config: &Config, cache: &mut StatCache) -> EngineOutput {
    match try_run(scalar, volume, grid, config, cache) {
        Ok(output) => output,
        Err(err) => {
            log::warn!("percolation sweep skipped: {err}");
            EngineOutput::empty()
        }
    }
}

/// Runs one threshold sweep, returning `Err` on validation failure instead of
/// degrading to an empty result.
pub fn try_run(scalar: &ScalarChannel, volume: &VolumeChannel, grid: &Grid, config: &Config, cache: &mut StatCache) -> Result<EngineOutput> {
    validate(scalar, volume, grid, config)?;

    match scalar {
        ScalarChannel::F32(values) => run_typed(values, volume, grid, config, cache),
        ScalarChannel::F64(values) => run_typed(values, volume, grid, config, cache),
        ScalarChannel::I16(values) => run_typed(values, volume, grid, config, cache),
        ScalarChannel::I32(values) => run_typed(values, volume, grid, config, cache),
    }
}

struct SweepEntry<T> {
    value: T,
    id: usize,
}

fn build_sweep_table<T: Scalar>(values: &Array1<T>) -> Vec<SweepEntry<T>> {
    let mut table: Vec<SweepEntry<T>> = (0..values.len())
        .into_par_iter()
        .map(|id| SweepEntry { value: values[id], id })
        .collect();
    table.par_sort_unstable_by(|a, b| {
        b.value
            .to_f64()
            .partial_cmp(&a.value.to_f64())
            .expect("scalar channel values must be comparable (no NaN)")
            .then_with(|| b.id.cmp(&a.id))
    });
    table
}

fn run_typed<T: Scalar>(
    values: &Array1<T>,
    volume: &VolumeChannel,
    grid: &Grid,
    config: &Config,
    cache: &mut StatCache,
) -> Result<EngineOutput> {
    let n = grid.len();
    let table = build_sweep_table(values);

    let sentinel = T::sentinel().to_f64();
    let end_bound = table.partition_point(|e| e.value.to_f64() > sentinel);
    let ntot = end_bound;
    if ntot == 0 {
        return Err(Error::EmptySweep);
    }

    let (min_idx, max_idx, min_val, max_val) = determine_window(&table[..end_bound], config)?;

    let mut uf = UnionFind::new(n);
    let mut arena = ComponentArena::new(n);
    let mut max_volume = 0.0_f64;
    let mut max_volume_rep: Option<usize> = None;
    let mut total_volume = 0.0_f64;
    let mut percolating = false;

    let previous_len = cache.len();
    let mut snapshot_out = None;

    let (mut next_val, h_step) = value_based_cursor(config, min_val, max_val);
    let nelt = max_idx.saturating_sub(min_idx) + 1;
    let bin_size = voxel_bin_size(nelt, config.num_samples);

    'sweep: for i in 0..=max_idx {
        let v = table[i].id;
        let h = table[i].value.to_f64();
        let vol = volume.get(v);
        total_volume += vol;
        let coord = grid.coord_of(v);

        let mut neigh_reps: ArrayVec<i64, 6> = ArrayVec::new();
        for nb in grid.neighbors(v) {
            let r = uf.find(nb);
            if r >= 0 && !neigh_reps.contains(&r) {
                neigh_reps.push(r);
            }
        }
        neigh_reps.sort_unstable();

        assert!(uf.find(v) < 0, "vertex {v} activated twice in one sweep");

        let rep = match neigh_reps.len() {
            0 => {
                uf.make_set(v);
                arena.create(v, vol, coord);
                v
            }
            1 => {
                let r = neigh_reps[0] as usize;
                uf.extend_set_by_rep(r, v);
                arena.add_volume(r, vol);
                arena.extend_extent(r, coord);
                r
            }
            _ => {
                let mut acc = neigh_reps[0] as usize;
                for &r in &neigh_reps[1..] {
                    let r = r as usize;
                    let winner = uf.union(r, acc) as usize;
                    let loser = if winner == r { acc } else { r };
                    arena.merge_into(winner, loser);
                    // The largest-so-far component survives under a new rep
                    // id whenever it loses union-by-size; re-point the
                    // tracked id so it doesn't go stale.
                    if max_volume_rep == Some(loser) {
                        max_volume_rep = Some(winner);
                    }
                    acc = winner;
                }
                uf.extend_set_by_rep(acc, v);
                arena.add_volume(acc, vol);
                arena.extend_extent(acc, coord);
                acc
            }
        };

        let rep_volume = arena.volume(rep);
        if rep_volume > max_volume {
            max_volume = rep_volume;
            max_volume_rep = Some(rep);
        }
        if arena.extent(rep).percolates(grid.dims(), config.perc_dim) {
            percolating = true;
        }

        if i < min_idx {
            continue;
        }

        let mut samples: Vec<f64> = Vec::new();
        match config.sample_mode {
            SampleMode::VoxelBased => {
                if (i - min_idx) % bin_size == 0 {
                    samples.push(h);
                }
            }
            SampleMode::ValueBased => {
                // h_step is 0 when num_samples <= 1: emit the single
                // requested sample once instead of looping forever.
                if h_step > 0.0 {
                    // Never sample past the window floor: a raw value well
                    // below min_val (e.g. a sparse tail) would otherwise keep
                    // the cursor decrementing indefinitely below it.
                    while h < next_val && next_val > min_val {
                        samples.push(next_val);
                        next_val -= h_step;
                    }
                } else if h < next_val {
                    samples.push(next_val);
                    next_val = f64::NEG_INFINITY;
                }
            }
        }

        if i == max_idx {
            match config.sample_mode {
                // The while-loop above is strict-less-than at plateau
                // boundaries, so it can stop one step short of minVal; always
                // make sure the window floor itself is represented.
                SampleMode::ValueBased => {
                    let already_at_floor = samples.last().is_some_and(|&t| (t - min_val).abs() < 1e-9);
                    if !already_at_floor {
                        samples.push(min_val);
                    }
                }
                SampleMode::VoxelBased => {
                    if samples.is_empty() {
                        samples.push(h);
                    }
                }
            }
        }

        let mut created_snapshot = false;
        for &threshold in &samples {
            let rows_this_run = cache.len() - previous_len;
            let is_snapshot_row = config.snapshot_at == Some(rows_this_run);
            if is_snapshot_row {
                snapshot_out = Some(snapshot::capture(&mut uf, &arena, max_volume_rep, threshold));
                created_snapshot = true;
            }

            let normalized_h = if (max_val - min_val).abs() < f64::EPSILON {
                0.0
            } else {
                (1.0 - (threshold - min_val) / (max_val - min_val)).clamp(0.0, 1.0)
            };

            cache.push(CacheRow {
                run_id: config.run_id,
                h: threshold,
                normalized_h,
                num_comps: uf.num_sets(),
                total_vol: total_volume,
                normalized_vol: total_volume / n as f64,
                largest_vol: max_volume,
                is_percolating: percolating,
            });

            // Several thresholds can be emitted for one sweep index under
            // ValueBased resampling; stop as soon as the snapshot row itself
            // is pushed instead of finishing the rest of this batch.
            if config.stop_early && is_snapshot_row {
                break;
            }
        }

        if config.stop_early && created_snapshot {
            break 'sweep;
        }
    }

    if let Some(snap_at) = config.snapshot_at {
        let emitted = cache.len() - previous_len;
        if snapshot_out.is_none() {
            return Err(Error::SnapshotOutOfRange {
                requested: snap_at,
                emitted,
            });
        }
    }

    let table_out = StatsTable::from_cache_rows(cache.rows_from(previous_len));
    Ok(EngineOutput {
        table: table_out,
        snapshot: snapshot_out,
    })
}

fn determine_window<T: Scalar>(table: &[SweepEntry<T>], config: &Config) -> Result<(usize, usize, f64, f64)> {
    let ntot = table.len();
    match config.window_mode {
        WindowMode::PercentOfEnds { percentage, cut_both_ends } => {
            let min_idx = ((ntot as f64 * percentage / 100.0).floor() as usize).min(ntot - 1);
            let max_idx = if cut_both_ends {
                let cut = (ntot as f64 * (100.0 - percentage) / 100.0).ceil() as usize;
                cut.min(ntot - 1)
            } else {
                ntot - 1
            };
            let min_val = table[max_idx].value.to_f64();
            let max_val = table[min_idx].value.to_f64();
            Ok((min_idx, max_idx, min_val, max_val))
        }
        WindowMode::Absolute { h_min, h_max } => {
            // Entries above h_max are still activated by the sweep loop
            // (it never skips indices, only gates sample emission on
            // min_idx), so min_idx only needs to exclude them from
            // *sampling*, not from union-find activation; h_max itself
            // stays in the window.
            let min_idx = table.partition_point(|e| e.value.to_f64() > h_max);
            // h_min is the inclusive floor of the window.
            let above_floor = table.partition_point(|e| e.value.to_f64() >= h_min);
            if above_floor == 0 || min_idx >= above_floor {
                return Err(Error::EmptySweep);
            }
            let max_idx = above_floor - 1;
            Ok((min_idx, max_idx, h_min, h_max))
        }
    }
}

fn value_based_cursor(config: &Config, min_val: f64, max_val: f64) -> (f64, f64) {
    if config.sample_mode != SampleMode::ValueBased {
        return (max_val, 0.0);
    }
    if config.num_samples <= 1 {
        (max_val, 0.0)
    } else {
        let h_step = (max_val - min_val) / (config.num_samples - 1) as f64;
        (max_val, h_step)
    }
}

fn voxel_bin_size(nelt: usize, num_samples: usize) -> usize {
    if num_samples <= 1 {
        nelt.max(1)
    } else {
        (nelt.saturating_sub(1) / (num_samples - 1)).max(1)
    }
}
