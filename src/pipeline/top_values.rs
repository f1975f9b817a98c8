//! Most prevalent lab values per harmonization key
//!
//! The FinRegistry statistics table has one row per observed raw value of a
//! lab test, with the number of people and records carrying that value. For
//! each (concept, test ID, abbreviation, unit) key the values are ranked by
//! people, then records, then the raw value itself, all descending, and the
//! first few are flattened into a single text field.

use std::collections::BTreeMap;

use polars::prelude::*;

use super::columns::{
    count_column, require_columns, text_column, STATS_ABBREVIATION, STATS_CONCEPT_ID,
    STATS_KEY, STATS_PEOPLE, STATS_RECORDS, STATS_REQUIRED, STATS_TEST_ID, STATS_UNIT,
    STATS_VALUE, TOP_VALUES,
};
use super::error::TableError;

/// Number of values kept per key unless configured otherwise
pub const DEFAULT_TOP_N: usize = 10;

/// Separator placed between flattened values
pub const VALUE_SEPARATOR: &str = " ; ";

/// Composite key shared by the statistics and harmonization tables.
///
/// Field order is the key order; the derived `Ord` compares fields left to
/// right, which is the order the statistics are sorted in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LabKey {
    pub concept_id: String,
    pub test_id: String,
    pub abbreviation: String,
    pub unit: String,
}

impl LabKey {
    pub fn new(
        concept_id: impl Into<String>,
        test_id: impl Into<String>,
        abbreviation: impl Into<String>,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            concept_id: concept_id.into(),
            test_id: test_id.into(),
            abbreviation: abbreviation.into(),
            unit: unit.into(),
        }
    }

    /// Build one key per row from four key columns, given in key order.
    pub fn from_columns(df: &DataFrame, names: [&str; 4]) -> Result<Vec<LabKey>, TableError> {
        let concept_ids = text_column(df, names[0])?;
        let test_ids = text_column(df, names[1])?;
        let abbreviations = text_column(df, names[2])?;
        let units = text_column(df, names[3])?;

        Ok(concept_ids
            .into_iter()
            .zip(test_ids)
            .zip(abbreviations)
            .zip(units)
            .map(|(((concept_id, test_id), abbreviation), unit)| LabKey {
                concept_id,
                test_id,
                abbreviation,
                unit,
            })
            .collect())
    }
}

/// One row of the FinRegistry lab value statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabValueStat {
    pub key: LabKey,
    pub value: String,
    pub n_people: u64,
    pub n_records: u64,
}

/// Extract the statistics rows from a loaded statistics table.
pub fn read_lab_value_stats(df: &DataFrame) -> Result<Vec<LabValueStat>, TableError> {
    require_columns(df, &STATS_REQUIRED)?;

    let keys = LabKey::from_columns(df, STATS_KEY)?;
    let values = text_column(df, STATS_VALUE)?;
    let people = count_column(df, STATS_PEOPLE)?;
    let records = count_column(df, STATS_RECORDS)?;

    Ok(keys
        .into_iter()
        .zip(values)
        .zip(people)
        .zip(records)
        .map(|(((key, value), n_people), n_records)| LabValueStat {
            key,
            value,
            n_people,
            n_records,
        })
        .collect())
}

/// Rank the values of every key and keep the first `top_n`.
///
/// All rows are sorted once, descending on (key, people, records, value).
/// Partitioning that sequence by key keeps the within-key ranking, so equal
/// counts fall back to the raw value compared as a string, descending.
pub fn rank_top_values(stats: &[LabValueStat], top_n: usize) -> BTreeMap<LabKey, Vec<String>> {
    let mut ranked: Vec<&LabValueStat> = stats.iter().collect();
    ranked.sort_by(|a, b| {
        (&b.key, b.n_people, b.n_records, &b.value).cmp(&(
            &a.key,
            a.n_people,
            a.n_records,
            &a.value,
        ))
    });

    let mut groups: BTreeMap<LabKey, Vec<String>> = BTreeMap::new();
    for stat in ranked {
        match groups.get_mut(&stat.key) {
            Some(values) => {
                if values.len() < top_n {
                    values.push(stat.value.clone());
                }
            }
            None => {
                let first = if top_n > 0 {
                    vec![stat.value.clone()]
                } else {
                    Vec::new()
                };
                groups.insert(stat.key.clone(), first);
            }
        }
    }

    groups
}

/// Ranked values per key, flattened with [`VALUE_SEPARATOR`].
///
/// Empty raw values are kept, so a group may flatten to `"a ;  ; b"`.
pub fn top_values_by_key(stats: &[LabValueStat], top_n: usize) -> BTreeMap<LabKey, String> {
    rank_top_values(stats, top_n)
        .into_iter()
        .map(|(key, values)| (key, values.join(VALUE_SEPARATOR)))
        .collect()
}

/// Lay out the flattened values as a table, one row per key in key order.
pub fn top_values_frame(top_values: &BTreeMap<LabKey, String>) -> PolarsResult<DataFrame> {
    let mut concept_ids = Vec::with_capacity(top_values.len());
    let mut test_ids = Vec::with_capacity(top_values.len());
    let mut abbreviations = Vec::with_capacity(top_values.len());
    let mut units = Vec::with_capacity(top_values.len());
    let mut flattened = Vec::with_capacity(top_values.len());

    for (key, values) in top_values {
        concept_ids.push(key.concept_id.as_str());
        test_ids.push(key.test_id.as_str());
        abbreviations.push(key.abbreviation.as_str());
        units.push(key.unit.as_str());
        flattened.push(values.as_str());
    }

    DataFrame::new(vec![
        Column::new(STATS_CONCEPT_ID.into(), concept_ids),
        Column::new(STATS_TEST_ID.into(), test_ids),
        Column::new(STATS_ABBREVIATION.into(), abbreviations),
        Column::new(STATS_UNIT.into(), units),
        Column::new(TOP_VALUES.into(), flattened),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stat(key: &LabKey, value: &str, n_people: u64, n_records: u64) -> LabValueStat {
        LabValueStat {
            key: key.clone(),
            value: value.to_string(),
            n_people,
            n_records,
        }
    }

    #[test]
    fn test_ranking_uses_people_then_records_then_value() {
        let key = LabKey::new("3020630", "1234", "p-krea", "umol/l");
        let stats = vec![
            stat(&key, "a", 5, 10),
            stat(&key, "b", 5, 20),
            stat(&key, "c", 7, 1),
            stat(&key, "d", 5, 20),
        ];

        let ranked = rank_top_values(&stats, 10);
        assert_eq!(ranked[&key], vec!["c", "d", "b", "a"]);
    }

    #[test]
    fn test_zero_top_n_keeps_keys_with_no_values() {
        let key = LabKey::new("1", "2", "x", "");
        let stats = vec![stat(&key, "v", 1, 1)];

        let flattened = top_values_by_key(&stats, 0);
        assert_eq!(flattened[&key], "");
    }

    #[test]
    fn test_single_value_has_no_separator() {
        let key = LabKey::new("1", "2", "x", "g/l");
        let stats = vec![stat(&key, "140", 3, 4)];

        assert_eq!(top_values_by_key(&stats, DEFAULT_TOP_N)[&key], "140");
    }

    #[test]
    fn test_frame_has_one_row_per_key() {
        let a = LabKey::new("1", "2", "x", "g/l");
        let b = LabKey::new("1", "2", "x", "mg/l");
        let stats = vec![stat(&a, "1", 1, 1), stat(&b, "2", 1, 1), stat(&a, "3", 2, 2)];

        let df = top_values_frame(&top_values_by_key(&stats, DEFAULT_TOP_N)).unwrap();
        let names: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
        assert_eq!(df.height(), 2);
        assert_eq!(
            names,
            vec!["OMOP_ID", "LAB_ID", "LAB_ABBREVIATION", "LAB_UNIT", "Top10LabValues"]
        );
    }
}
