//! Columnar percolation statistics output.

/// One row as accumulated in the cache, before the per-run `maxNumCompsInRun`
/// / `compRatio` / `volRatio` derived columns are computed.
#[derive(Clone, Copy, Debug)]
pub(crate) struct CacheRow {
    pub run_id: i32,
    pub h: f64,
    pub normalized_h: f64,
    pub num_comps: usize,
    pub total_vol: f64,
    pub normalized_vol: f64,
    pub largest_vol: f64,
    pub is_percolating: bool,
}

/// Process-wide accumulator of [`CacheRow`]s across successive calls to
/// [`crate::engine::run`]. Reset explicitly via [`StatCache::clear`]; never
/// reset implicitly by the engine itself.
#[derive(Clone, Debug, Default)]
pub struct StatCache {
    rows: Vec<CacheRow>,
}

impl StatCache {
    /// An empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every accumulated row.
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Number of rows accumulated so far, across all runs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no rows have been accumulated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub(crate) fn push(&mut self, row: CacheRow) {
        self.rows.push(row);
    }

    pub(crate) fn rows_from(&self, start: usize) -> &[CacheRow] {
        &self.rows[start..]
    }
}

/// One finished row of a [`StatsTable`], matching the fixed output schema.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct StatRow {
    /// Caller-supplied iteration id.
    pub run_id: i32,
    /// Threshold H at which this row was sampled.
    pub h: f32,
    /// `1 - (H - minVal) / (maxVal - minVal)`, clamped to `[0, 1]`.
    pub value_fraction: f32,
    /// Total wetted volume divided by vertex count.
    pub normalized_volume: f32,
    /// Number of live components at this sample.
    pub num_comps: i32,
    /// Maximum `num_comps` observed anywhere in this run.
    pub max_num_comps_in_run: i32,
    /// `num_comps / max_num_comps_in_run`.
    pub comp_ratio: f32,
    /// Volume of the largest component so far.
    pub largest_vol: f32,
    /// Total wetted volume so far.
    pub total_vol: f32,
    /// `largest_vol / total_vol`, or 0 if `total_vol == 0`.
    pub vol_ratio: f32,
    /// Whether any component has percolated by this sample.
    pub is_percolating: i32,
}

/// The fixed-schema, row-aligned output of one call to
/// [`crate::engine::run`].
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct StatsTable {
    rows: Vec<StatRow>,
}

impl StatsTable {
    /// A table with no rows, returned when validation fails or the sweep has
    /// no vertices.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The rows of this table, in sweep (strictly decreasing threshold)
    /// order.
    #[must_use]
    pub fn rows(&self) -> &[StatRow] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether this table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub(crate) fn from_cache_rows(rows: &[CacheRow]) -> Self {
        if rows.is_empty() {
            return Self::empty();
        }

        let max_num_comps_in_run = rows.iter().map(|r| r.num_comps).max().unwrap_or(0);

        let rows = rows
            .iter()
            .map(|r| StatRow {
                run_id: r.run_id,
                h: r.h as f32,
                value_fraction: r.normalized_h as f32,
                normalized_volume: r.normalized_vol as f32,
                num_comps: r.num_comps as i32,
                max_num_comps_in_run: max_num_comps_in_run as i32,
                comp_ratio: r.num_comps as f32 / max_num_comps_in_run as f32,
                largest_vol: r.largest_vol as f32,
                total_vol: r.total_vol as f32,
                vol_ratio: if r.total_vol == 0.0 {
                    0.0
                } else {
                    (r.largest_vol / r.total_vol) as f32
                },
                is_percolating: i32::from(r.is_percolating),
            })
            .collect();

        Self { rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    fn row(num_comps: usize, total_vol: f64, largest_vol: f64) -> CacheRow {
        CacheRow {
            run_id: 0,
            h: 1.0,
            normalized_h: 0.0,
            num_comps,
            total_vol,
            normalized_vol: total_vol / 4.0,
            largest_vol,
            is_percolating: false,
        }
    }

    #[test]
    fn max_num_comps_is_per_run_maximum() {
        let rows = [row(1, 1.0, 1.0), row(3, 2.0, 1.0), row(2, 3.0, 2.0)];
        let table = StatsTable::from_cache_rows(&rows);
        for r in table.rows() {
            assert_eq!(r.max_num_comps_in_run, 3);
        }
        assert!(approx_eq!(f32, table.rows()[1].comp_ratio, 1.0, epsilon = 1e-6));
    }

    #[test]
    fn vol_ratio_is_zero_for_empty_sweep() {
        let rows = [row(0, 0.0, 0.0)];
        let table = StatsTable::from_cache_rows(&rows);
        assert!(approx_eq!(f32, table.rows()[0].vol_ratio, 0.0, epsilon = 1e-6));
    }

    #[test]
    fn empty_cache_rows_yield_empty_table() {
        assert!(StatsTable::from_cache_rows(&[]).is_empty());
    }
}
