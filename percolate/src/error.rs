//! Error types returned by this crate.

use thiserror::Error;

/// Reasons a call into this crate can fail.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum Error {
    /// The scalar or volume channel was not supplied.
    #[error("missing {0} channel")]
    MissingChannel(&'static str),
    /// A channel had more than one component where exactly one was required.
    #[error("channel `{0}` has {1} components, expected 1")]
    WrongArity(&'static str, usize),
    /// The scalar and volume channels disagree on vertex count or grid primitive.
    #[error("grid mismatch: scalar channel has {scalar_len} vertices, volume channel has {volume_len}")]
    GridMismatch {
        /// Length of the scalar channel.
        scalar_len: usize,
        /// Length of the volume channel.
        volume_len: usize,
    },
    /// No vertex passed the sentinel filter, or none fall inside the
    /// requested window.
    #[error("sweep is empty: no vertex passed the sentinel filter or fell inside the requested window")]
    EmptySweep,
    /// The supplied configuration is not usable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// `snapshotAt` referred to a sample that was never emitted.
    #[error("snapshot requested at sample {requested}, but only {emitted} rows were emitted")]
    SnapshotOutOfRange {
        /// The requested sample index.
        requested: usize,
        /// The number of rows actually emitted.
        emitted: usize,
    },
}

/// Convenience alias for results returned by this crate.
pub type Result<T> = std::result::Result<T, Error>;
