use crate::common::{ConfigArgs, GridArgs};
use crate::helpers;
use crate::{GlobalConfiguration, Subcommand};
use anyhow::{Context, Result};
use itertools::Itertools;
use percolate::{classifier, RawLoader, StatCache, SyntheticLoader};
use prettytable::{cell, row};
use std::process::ExitCode;

/// Run one threshold sweep, freeze a cluster snapshot, and print the
/// per-cluster table together with the local/global classification against a
/// block partition.
#[derive(clap::Parser)]
pub struct Opts {
    #[command(flatten)]
    grid: GridArgs,
    #[command(flatten)]
    sweep: ConfigArgs,
    /// Block size along x, y, z used for the local/global classification.
    #[arg(long, num_args = 3, default_values_t = [4, 4, 4], value_names = ["BX", "BY", "BZ"])]
    block_size: Vec<usize>,
}

impl Subcommand for Opts {
    fn run(&self, _: &GlobalConfiguration) -> Result<ExitCode> {
        let grid = self.grid.grid();
        let loader = SyntheticLoader::new(grid, self.grid.seed);
        let (scalar, volume, grid) = loader
            .load(self.grid.time_index)
            .context("unable to generate the synthetic demo field")?;

        let mut config = self.sweep.resolve()?;
        if config.snapshot_at.is_none() {
            // num_samples is a request, not a guarantee: a narrow or
            // sparsely-populated grid can emit fewer rows than asked for, so
            // probe the actual row count instead of assuming num_samples - 1.
            let mut probe_cache = StatCache::new();
            let probe = percolate::try_run(&scalar, &volume, &grid, &config, &mut probe_cache)
                .context("percolation sweep failed")?;
            config.snapshot_at = Some(probe.table.len().saturating_sub(1));
        }

        let mut cache = StatCache::new();
        let output = percolate::try_run(&scalar, &volume, &grid, &config, &mut cache)
            .context("percolation sweep failed")?;
        let snapshot = output
            .snapshot
            .context("sweep completed but produced no snapshot")?;

        let block_size = (self.block_size[0], self.block_size[1], self.block_size[2]);
        let classified = classifier::classify(&snapshot, &grid, block_size);

        let mut table = helpers::create_table();
        table.set_titles(row![c => "id", "volume", "sizeX", "sizeY", "sizeZ", "sizeBbox"]);
        for cluster in &snapshot.clusters {
            let row = table.add_empty_row();
            row.add_cell(cell!(r->cluster.id.to_string()));
            row.add_cell(cell!(r->format!("{:.4}", cluster.volume)));
            row.add_cell(cell!(r->cluster.size_x.to_string()));
            row.add_cell(cell!(r->cluster.size_y.to_string()));
            row.add_cell(cell!(r->cluster.size_z.to_string()));
            row.add_cell(cell!(r->cluster.size_bbox.to_string()));
        }
        table.printstd();

        println!(
            "threshold: {:.4}, global cluster fraction: {:.2}%, global voxel fraction: {:.2}%",
            snapshot.threshold, classified.global_cluster_fraction, classified.global_voxel_fraction
        );
        println!("cluster ids: {}", snapshot.clusters.iter().map(|c| c.id).join(", "));

        Ok(ExitCode::SUCCESS)
    }
}
