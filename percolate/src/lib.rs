#![warn(clippy::all, clippy::cargo, clippy::nursery, clippy::pedantic)]
#![warn(missing_docs)]

//! Incremental percolation analysis over 3-D structured scalar grids.
//!
//! The entry point is [`engine::run`] (or [`engine::try_run`]): given a
//! scalar channel, a volume channel, a [`grid::Grid`] and a
//! [`config::Config`], it sweeps vertices from high to low value, grows
//! connected components with a union-find, and appends one row per emitted
//! sample to a [`stats::StatCache`].

mod arena;
pub mod channel;
pub mod classifier;
pub mod config;
pub mod engine;
pub mod error;
pub mod extent;
pub mod grid;
pub mod loader;
pub mod snapshot;
pub mod stats;
pub mod union_find;

pub use channel::{Scalar, ScalarChannel, VolumeChannel};
pub use config::{Config, SampleMode, WindowMode};
pub use engine::{run, try_run, EngineOutput};
pub use error::{Error, Result};
pub use extent::Extent;
pub use grid::{Grid, PercDim};
pub use loader::{RawLoader, SyntheticLoader};
pub use snapshot::{ClusterRecord, ClusterSnapshot};
pub use stats::{StatCache, StatRow, StatsTable};
pub use union_find::UnionFind;
