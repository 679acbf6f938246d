//! Per-component aggregate storage, arena-allocated by vertex id.
//!
//! Component aggregates are kept in parallel arrays of length N indexed by
//! representative id (a representative is always one of its member vertex
//! ids) rather than in a hash map keyed by representative. This avoids map
//! churn across sweeps with tens of millions of vertices.

use crate::extent::Extent;

pub(crate) struct ComponentArena {
    volume: Vec<f64>,
    extent: Vec<Extent>,
    present: Vec<bool>,
}

impl ComponentArena {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            volume: vec![0.0; capacity],
            extent: vec![Extent::empty(); capacity],
            present: vec![false; capacity],
        }
    }

    pub(crate) fn create(&mut self, rep: usize, volume: f64, coord: (usize, usize, usize)) {
        self.present[rep] = true;
        self.volume[rep] = volume;
        self.extent[rep] = Extent::at(coord);
    }

    pub(crate) fn add_volume(&mut self, rep: usize, volume: f64) {
        self.volume[rep] += volume;
    }

    pub(crate) fn extend_extent(&mut self, rep: usize, coord: (usize, usize, usize)) {
        self.extent[rep].extend(coord);
    }

    pub(crate) fn volume(&self, rep: usize) -> f64 {
        self.volume[rep]
    }

    pub(crate) fn extent(&self, rep: usize) -> &Extent {
        &self.extent[rep]
    }

    pub(crate) fn is_present(&self, rep: usize) -> bool {
        self.present[rep]
    }

    /// Folds `loser`'s aggregates into `winner`'s and marks `loser` absent.
    pub(crate) fn merge_into(&mut self, winner: usize, loser: usize) {
        let loser_volume = self.volume[loser];
        let loser_extent = self.extent[loser];
        self.volume[winner] += loser_volume;
        self.extent[winner].merge(&loser_extent);
        self.present[loser] = false;
    }
}
