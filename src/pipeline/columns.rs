//! Column names and typed column extraction
//!
//! Every input column is loaded as text. Free-form identifiers (concept IDs,
//! lab test IDs, units) are kept exactly as written; only count columns are
//! parsed, and only by the transforms that need them.

use polars::prelude::*;

use super::error::TableError;

// Harmonization table
pub const CONCEPT_ID: &str = "OMOP Concept ID";
pub const TEST_ID: &str = "Lab test ID";
pub const TEST_ABBREVIATION: &str = "Lab test abbreviation";
pub const TEST_UNIT: &str = "Lab test unit";
pub const N_RECORDS: &str = "N Records";

// FinRegistry lab value statistics
pub const STATS_CONCEPT_ID: &str = "OMOP_ID";
pub const STATS_TEST_ID: &str = "LAB_ID";
pub const STATS_ABBREVIATION: &str = "LAB_ABBREVIATION";
pub const STATS_UNIT: &str = "LAB_UNIT";
pub const STATS_VALUE: &str = "LAB_VALUE";
pub const STATS_PEOPLE: &str = "NPeople";
pub const STATS_RECORDS: &str = "NRecords";

/// Derived column holding the flattened top values
pub const TOP_VALUES: &str = "Top10LabValues";

/// Key columns of the harmonization table, in key order
pub const HARMONIZATION_KEY: [&str; 4] = [CONCEPT_ID, TEST_ID, TEST_ABBREVIATION, TEST_UNIT];

/// Key columns of the statistics table, in key order
pub const STATS_KEY: [&str; 4] = [
    STATS_CONCEPT_ID,
    STATS_TEST_ID,
    STATS_ABBREVIATION,
    STATS_UNIT,
];

/// Columns the statistics table must provide
pub const STATS_REQUIRED: [&str; 7] = [
    STATS_CONCEPT_ID,
    STATS_TEST_ID,
    STATS_ABBREVIATION,
    STATS_UNIT,
    STATS_VALUE,
    STATS_PEOPLE,
    STATS_RECORDS,
];

/// Columns the harmonization table must provide for the coverage flag
pub const COVERAGE_REQUIRED: [&str; 2] = [CONCEPT_ID, N_RECORDS];

/// Fail with the first required column that is absent from `df`.
pub fn require_columns(df: &DataFrame, required: &[&str]) -> Result<(), TableError> {
    let present: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    match required
        .iter()
        .find(|col| !present.iter().any(|p| p.as_str() == **col))
    {
        Some(missing) => Err(TableError::missing_column(missing)),
        None => Ok(()),
    }
}

/// Read a column as text. Nulls (empty CSV cells) become empty strings.
pub fn text_column(df: &DataFrame, name: &str) -> Result<Vec<String>, TableError> {
    let column = df
        .column(name)
        .map_err(|_| TableError::missing_column(name))?;
    let column = column.cast(&DataType::String)?;

    Ok(column
        .str()?
        .into_iter()
        .map(|v| v.unwrap_or_default().to_string())
        .collect())
}

/// Mark the rows where any of `names` is null.
///
/// `text_column` folds nulls into empty strings; this keeps them apart so a
/// join can refuse to match on a missing key field.
pub fn null_rows(df: &DataFrame, names: &[&str]) -> Result<Vec<bool>, TableError> {
    let mut mask = vec![false; df.height()];

    for name in names {
        let column = df
            .column(name)
            .map_err(|_| TableError::missing_column(name))?;
        let column = column.cast(&DataType::String)?;

        for (is_null, cell) in mask.iter_mut().zip(column.str()?.into_iter()) {
            *is_null |= cell.is_none();
        }
    }

    Ok(mask)
}

/// Read a column of non-negative integer counts.
pub fn count_column(df: &DataFrame, name: &str) -> Result<Vec<u64>, TableError> {
    let column = df
        .column(name)
        .map_err(|_| TableError::missing_column(name))?;
    let column = column.cast(&DataType::String)?;

    column
        .str()?
        .into_iter()
        .enumerate()
        .map(|(idx, cell)| {
            let raw = cell.unwrap_or_default();
            raw.trim()
                .parse::<u64>()
                .map_err(|_| TableError::InvalidCount {
                    column: name.to_string(),
                    row: idx + 1,
                    value: raw.to_string(),
                })
        })
        .collect()
}
