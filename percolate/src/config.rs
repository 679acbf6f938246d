//! Sweep configuration.

use crate::error::{Error, Result};
use crate::grid::PercDim;
use serde::{Deserialize, Serialize};

/// How samples are placed along the sweep.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum SampleMode {
    /// Uniform spacing in the scalar value H.
    ValueBased,
    /// Uniform spacing in the count of activated vertices.
    VoxelBased,
}

/// How the swept range of H is determined.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub enum WindowMode {
    /// Sweep exactly `[h_min, h_max]`.
    Absolute {
        /// Lower bound of the sweep window.
        h_min: f64,
        /// Upper bound of the sweep window.
        h_max: f64,
    },
    /// Trim `percentage` percent of vertices from the high end (and,
    /// optionally, the low end too) of the sorted value table.
    PercentOfEnds {
        /// Percentage (0..=100) of vertices to cut from the high end.
        percentage: f64,
        /// Whether to also cut the same percentage from the low end.
        cut_both_ends: bool,
    },
}

/// Full configuration for one call to [`crate::engine::run`].
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct Config {
    /// Value- vs. voxel-based sample placement.
    pub sample_mode: SampleMode,
    /// Target number of samples to emit.
    pub num_samples: usize,
    /// How the swept H range is determined.
    pub window_mode: WindowMode,
    /// Dimension mode the percolation test is evaluated against.
    pub perc_dim: PercDim,
    /// Sample index at which to freeze a [`crate::snapshot::ClusterSnapshot`].
    pub snapshot_at: Option<usize>,
    /// Halt the sweep immediately after the snapshot is taken.
    pub stop_early: bool,
    /// Caller-supplied iteration id, written into every emitted row.
    pub run_id: i32,
}

impl Config {
    /// Validates this configuration, returning the reason it is unusable (if
    /// any).
    pub fn validate(&self) -> Result<()> {
        if self.num_samples < 1 {
            return Err(Error::InvalidConfig(
                "numSamples must be at least 1".to_owned(),
            ));
        }

        match self.window_mode {
            WindowMode::Absolute { h_min, h_max } => {
                if h_min > h_max {
                    return Err(Error::InvalidConfig(format!(
                        "window is reversed: hMin ({h_min}) > hMax ({h_max})"
                    )));
                }
            }
            WindowMode::PercentOfEnds { percentage, cut_both_ends } => {
                if !(0.0..=100.0).contains(&percentage) {
                    return Err(Error::InvalidConfig(format!(
                        "percentage {percentage} is outside [0, 100]"
                    )));
                }
                if cut_both_ends && percentage > 50.0 {
                    return Err(Error::InvalidConfig(format!(
                        "cutBothEnds requires percentage <= 50 (got {percentage}), otherwise the window is reversed"
                    )));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Config {
        Config {
            sample_mode: SampleMode::VoxelBased,
            num_samples: 10,
            window_mode: WindowMode::PercentOfEnds {
                percentage: 0.0,
                cut_both_ends: false,
            },
            perc_dim: PercDim::Any,
            snapshot_at: None,
            stop_early: false,
            run_id: 0,
        }
    }

    #[test]
    fn zero_samples_is_invalid() {
        let mut cfg = base();
        cfg.num_samples = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn reversed_absolute_window_is_invalid() {
        let mut cfg = base();
        cfg.window_mode = WindowMode::Absolute {
            h_min: 5.0,
            h_max: 1.0,
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn valid_config_passes() {
        assert!(base().validate().is_ok());
    }

    #[test]
    fn cut_both_ends_above_fifty_percent_is_invalid() {
        let mut cfg = base();
        cfg.window_mode = WindowMode::PercentOfEnds {
            percentage: 60.0,
            cut_both_ends: true,
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn cut_both_ends_at_fifty_percent_is_valid() {
        let mut cfg = base();
        cfg.window_mode = WindowMode::PercentOfEnds {
            percentage: 50.0,
            cut_both_ends: true,
        };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn high_percentage_without_cut_both_ends_is_valid() {
        let mut cfg = base();
        cfg.window_mode = WindowMode::PercentOfEnds {
            percentage: 90.0,
            cut_both_ends: false,
        };
        assert!(cfg.validate().is_ok());
    }
}
