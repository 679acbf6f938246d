//! Arguments shared between the `run` and `snapshot` subcommands.

use anyhow::{bail, Result};
use clap::{Args, ValueEnum};
use percolate::{PercDim, SampleMode, WindowMode};
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CliSampleMode {
    ValueBased,
    VoxelBased,
}

impl From<CliSampleMode> for SampleMode {
    fn from(mode: CliSampleMode) -> Self {
        match mode {
            CliSampleMode::ValueBased => Self::ValueBased,
            CliSampleMode::VoxelBased => Self::VoxelBased,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CliPercDim {
    X,
    Y,
    Z,
    Any,
    All,
}

impl From<CliPercDim> for PercDim {
    fn from(dim: CliPercDim) -> Self {
        match dim {
            CliPercDim::X => Self::X,
            CliPercDim::Y => Self::Y,
            CliPercDim::Z => Self::Z,
            CliPercDim::Any => Self::Any,
            CliPercDim::All => Self::All,
        }
    }
}

/// Grid and synthetic-field arguments common to every subcommand.
#[derive(Args, Debug)]
pub struct GridArgs {
    /// Number of vertices along x.
    #[arg(long, default_value_t = 16)]
    pub nx: usize,
    /// Number of vertices along y.
    #[arg(long, default_value_t = 16)]
    pub ny: usize,
    /// Number of vertices along z.
    #[arg(long, default_value_t = 16)]
    pub nz: usize,
    /// Wrap neighbor lookups around the x axis.
    #[arg(long)]
    pub periodic_x: bool,
    /// Wrap neighbor lookups around the y axis.
    #[arg(long)]
    pub periodic_y: bool,
    /// Wrap neighbor lookups around the z axis.
    #[arg(long)]
    pub periodic_z: bool,
    /// Deterministic seed for the synthetic demo field.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,
    /// Time slice of the synthetic field to generate.
    #[arg(long, default_value_t = 1)]
    pub time_index: usize,
}

impl GridArgs {
    pub fn grid(&self) -> percolate::Grid {
        percolate::Grid::new(
            (self.nx, self.ny, self.nz),
            (self.periodic_x, self.periodic_y, self.periodic_z),
        )
    }
}

/// Sweep-configuration arguments common to every subcommand.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Load the sweep configuration from a JSON file instead of the flags
    /// below.
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    /// Value- vs. voxel-based sample placement.
    #[arg(long, value_enum, default_value_t = CliSampleMode::VoxelBased)]
    pub sample_mode: CliSampleMode,
    /// Target number of samples to emit.
    #[arg(long, default_value_t = 20)]
    pub num_samples: usize,
    /// Percentage of vertices to cut from the high end of the sorted value
    /// table. Ignored if `--h-min`/`--h-max` are given.
    #[arg(long, default_value_t = 0.0)]
    pub percentage: f64,
    /// Also cut `--percentage` percent from the low end.
    #[arg(long)]
    pub cut_both_ends: bool,
    /// Lower bound of an absolute sweep window. Requires `--h-max`.
    #[arg(long, requires = "h_max")]
    pub h_min: Option<f64>,
    /// Upper bound of an absolute sweep window. Requires `--h-min`.
    #[arg(long, requires = "h_min")]
    pub h_max: Option<f64>,
    /// Dimension the percolation test is evaluated against.
    #[arg(long, value_enum, default_value_t = CliPercDim::Any)]
    pub perc_dim: CliPercDim,
    /// Sample index at which to freeze a cluster snapshot.
    #[arg(long)]
    pub snapshot_at: Option<usize>,
    /// Halt the sweep immediately after the snapshot is taken.
    #[arg(long)]
    pub stop_early: bool,
    /// Iteration id written into every emitted row.
    #[arg(long, default_value_t = 0)]
    pub run_id: i32,
}

impl ConfigArgs {
    pub fn resolve(&self) -> Result<percolate::Config> {
        if let Some(path) = &self.config {
            return crate::helpers::read_config(path);
        }

        let window_mode = match (self.h_min, self.h_max) {
            (Some(h_min), Some(h_max)) => WindowMode::Absolute { h_min, h_max },
            (None, None) => WindowMode::PercentOfEnds {
                percentage: self.percentage,
                cut_both_ends: self.cut_both_ends,
            },
            _ => bail!("--h-min and --h-max must be given together"),
        };

        Ok(percolate::Config {
            sample_mode: self.sample_mode.into(),
            num_samples: self.num_samples,
            window_mode,
            perc_dim: self.perc_dim.into(),
            snapshot_at: self.snapshot_at,
            stop_early: self.stop_early,
            run_id: self.run_id,
        })
    }
}
