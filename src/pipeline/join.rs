//! Left join of the harmonization table with the per-key top values

use std::collections::BTreeMap;

use polars::prelude::*;

use super::columns::{null_rows, require_columns, HARMONIZATION_KEY, TOP_VALUES};
use super::error::TableError;
use super::top_values::LabKey;

/// Result of joining top values onto the harmonization table
#[derive(Debug)]
pub struct JoinOutcome {
    /// Harmonization table with the top values column appended
    pub frame: DataFrame,
    /// Number of harmonization rows whose key had statistics
    pub matched_rows: usize,
}

/// Append the flattened top values to every harmonization row.
///
/// All four key columns must match for a row to receive a value; unmatched
/// rows get a null. A row with a null in any key column never matches, even
/// when a statistics group has an empty field in the same place. Rows are
/// neither dropped nor duplicated and keys present only in `top_values` are
/// ignored.
///
/// A harmonization table that already carries the top values column is
/// rejected rather than overwritten.
pub fn join_top_values(
    harmonization: &DataFrame,
    top_values: &BTreeMap<LabKey, String>,
) -> Result<JoinOutcome, TableError> {
    require_columns(harmonization, &HARMONIZATION_KEY)?;
    if harmonization.column(TOP_VALUES).is_ok() {
        return Err(TableError::ColumnExists {
            column: TOP_VALUES.to_string(),
        });
    }

    let keys = LabKey::from_columns(harmonization, HARMONIZATION_KEY)?;
    let has_null = null_rows(harmonization, &HARMONIZATION_KEY)?;
    let joined: Vec<Option<&str>> = keys
        .iter()
        .zip(has_null)
        .map(|(key, has_null)| {
            if has_null {
                None
            } else {
                top_values.get(key).map(String::as_str)
            }
        })
        .collect();
    let matched_rows = joined.iter().filter(|v| v.is_some()).count();

    let mut frame = harmonization.clone();
    frame.with_column(Column::new(TOP_VALUES.into(), joined))?;

    Ok(JoinOutcome {
        frame,
        matched_rows,
    })
}
