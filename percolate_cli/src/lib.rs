#![allow(clippy::missing_errors_doc)]
#![allow(missing_docs)]

mod common;
mod helpers;
mod run;
mod snapshot;

use anyhow::Result;
use clap::Parser;
use git_version::git_version;
use std::process::ExitCode;

#[derive(Parser)]
pub struct GlobalConfiguration {
    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

pub trait Subcommand {
    fn run(&self, cfg: &GlobalConfiguration) -> Result<ExitCode>;
}

#[derive(Parser)]
pub enum SubcommandEnum {
    /// Sweep a synthetic demo field and print the statistics table.
    Run(run::Opts),
    /// Sweep a synthetic demo field, freeze a cluster snapshot, and classify
    /// it against a block partition.
    Snapshot(snapshot::Opts),
}

impl Subcommand for SubcommandEnum {
    fn run(&self, cfg: &GlobalConfiguration) -> Result<ExitCode> {
        match self {
            Self::Run(opts) => opts.run(cfg),
            Self::Snapshot(opts) => opts.run(cfg),
        }
    }
}

#[derive(Parser)]
#[command(
    arg_required_else_help = true,
    author,
    about,
    disable_help_subcommand = true,
    name = "percolate",
    version = git_version!(
        args = ["--always", "--dirty", "--long", "--tags"],
        cargo_prefix = "",
        fallback = "unknown"
    )
)]
pub struct Opts {
    #[command(flatten)]
    pub configuration: GlobalConfiguration,
    #[command(subcommand)]
    pub subcommand: SubcommandEnum,
}
