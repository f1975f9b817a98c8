//! Cumulative coverage flags per OMOP concept
//!
//! Within each concept, rows are taken from the largest record count down.
//! A row is flagged when the rows before it had not yet reached the coverage
//! threshold, so the row that crosses the threshold is kept and the largest
//! row of every concept is always kept.

use std::collections::HashMap;

use polars::prelude::*;

use super::columns::{
    count_column, require_columns, text_column, CONCEPT_ID, COVERAGE_REQUIRED, N_RECORDS,
};
use super::error::TableError;

/// Coverage percentage used unless configured otherwise
pub const DEFAULT_COVERAGE_PERCENT: f64 = 90.0;

/// Per-row coverage statistics, reported in input row order.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CoverageStat {
    /// Sum of counts over the row's group, wide enough for any number of
    /// `u64` counts
    pub total: u128,
    /// Running sum up to and including this row, largest counts first
    pub cumsum: u128,
    /// `100 * cumsum / total`; NaN when the group total is zero
    pub cum_percentage: f64,
    /// `cum_percentage < threshold`
    pub below_threshold: bool,
    /// Previous row's `below_threshold` in the group, `true` for the first row
    pub include: bool,
}

/// Compute coverage statistics for `(group, count)` rows.
///
/// Each group's row positions are stable-sorted by count descending, so equal
/// counts keep their input order. Results are written back by position and
/// come out in the order of `rows`.
///
/// A group whose counts sum to zero has NaN percentages; NaN never compares
/// below the threshold, so only its first row is included.
pub fn coverage_stats(rows: &[(String, u64)], threshold_percent: f64) -> Vec<CoverageStat> {
    let mut groups: HashMap<&str, Vec<usize>> = HashMap::new();
    for (position, (group, _)) in rows.iter().enumerate() {
        groups.entry(group.as_str()).or_default().push(position);
    }

    let mut stats = vec![CoverageStat::default(); rows.len()];

    for positions in groups.values_mut() {
        positions.sort_by(|&a, &b| rows[b].1.cmp(&rows[a].1));

        let total: u128 = positions.iter().map(|&p| u128::from(rows[p].1)).sum();
        let mut cumsum = 0u128;
        let mut previous_below = true;

        for &position in positions.iter() {
            cumsum += u128::from(rows[position].1);
            let cum_percentage = 100.0 * cumsum as f64 / total as f64;
            let below_threshold = cum_percentage < threshold_percent;

            stats[position] = CoverageStat {
                total,
                cumsum,
                cum_percentage,
                below_threshold,
                include: previous_below,
            };
            previous_below = below_threshold;
        }
    }

    stats
}

/// Inclusion flag per row, in the order of `rows`.
pub fn coverage_flags(rows: &[(String, u64)], threshold_percent: f64) -> Vec<bool> {
    coverage_stats(rows, threshold_percent)
        .into_iter()
        .map(|stat| stat.include)
        .collect()
}

/// Name of the flag column, e.g. `Include_first_to_90percent`.
pub fn flag_column_name(threshold_percent: f64) -> String {
    if threshold_percent.fract() == 0.0 {
        format!("Include_first_to_{}percent", threshold_percent as u64)
    } else {
        format!("Include_first_to_{}percent", threshold_percent)
    }
}

/// Flag harmonization rows needed to reach `threshold_percent` of each
/// concept's records.
///
/// The output holds only the concept ID, the record count and the flag, in
/// the input row order.
pub fn keep_percent_frame(df: &DataFrame, threshold_percent: f64) -> Result<DataFrame, TableError> {
    require_columns(df, &COVERAGE_REQUIRED)?;

    let concept_ids = text_column(df, CONCEPT_ID)?;
    let counts = count_column(df, N_RECORDS)?;
    let rows: Vec<(String, u64)> = concept_ids.into_iter().zip(counts).collect();

    let flags = coverage_flags(&rows, threshold_percent);
    let (concept_ids, counts): (Vec<String>, Vec<u64>) = rows.into_iter().unzip();

    let frame = DataFrame::new(vec![
        Column::new(CONCEPT_ID.into(), concept_ids),
        Column::new(N_RECORDS.into(), counts),
        Column::new(flag_column_name(threshold_percent).into(), flags),
    ])?;

    Ok(frame)
}
