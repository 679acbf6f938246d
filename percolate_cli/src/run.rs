use crate::common::{ConfigArgs, GridArgs};
use crate::helpers;
use crate::{GlobalConfiguration, Subcommand};
use anyhow::{Context, Result};
use percolate::{RawLoader, StatCache, SyntheticLoader};
use prettytable::{cell, row};
use std::process::ExitCode;

/// Run one threshold sweep over a synthetic demo field and print the
/// resulting statistics table.
#[derive(clap::Parser)]
pub struct Opts {
    #[command(flatten)]
    grid: GridArgs,
    #[command(flatten)]
    sweep: ConfigArgs,
}

impl Subcommand for Opts {
    fn run(&self, _: &GlobalConfiguration) -> Result<ExitCode> {
        let grid = self.grid.grid();
        let loader = SyntheticLoader::new(grid, self.grid.seed);
        let (scalar, volume, grid) = loader
            .load(self.grid.time_index)
            .context("unable to generate the synthetic demo field")?;
        let config = self.sweep.resolve()?;

        let mut cache = StatCache::new();
        let output = percolate::try_run(&scalar, &volume, &grid, &config, &mut cache)
            .context("percolation sweep failed")?;

        let mut table = helpers::create_table();
        table.set_titles(row![
            c => "h", "valueFrac", "numComps", "compRatio", "largestVol", "volRatio", "perc"
        ]);
        for r in output.table.rows() {
            let row = table.add_empty_row();
            row.add_cell(cell!(r->format!("{:.4}", r.h)));
            row.add_cell(cell!(r->format!("{:.4}", r.value_fraction)));
            row.add_cell(cell!(r->r.num_comps.to_string()));
            row.add_cell(cell!(r->format!("{:.4}", r.comp_ratio)));
            row.add_cell(cell!(r->format!("{:.4}", r.largest_vol)));
            row.add_cell(cell!(r->format!("{:.4}", r.vol_ratio)));
            row.add_cell(cell!(c->if r.is_percolating == 1 { "yes" } else { "no" }));
        }
        table.printstd();

        Ok(ExitCode::SUCCESS)
    }
}
