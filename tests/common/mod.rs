//! Shared test utilities and fixture generators

#![allow(dead_code)]

use labmerge::pipeline::{LabKey, LabValueStat};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const HARMONIZATION_HEADER: &str = "OMOP Concept ID,OMOP Concept name,Lab test ID,Lab test abbreviation,Lab test unit,N people,N Records,Comment";

pub const STATS_HEADER: &str =
    "OMOP_ID,LAB_ID,LAB_ABBREVIATION,LAB_UNIT,LAB_VALUE,NPeople,NRecords";

/// Write `lines` as a file named `name` inside `dir`
pub fn write_lines(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    path
}

/// Small harmonization table: two creatinine mappings, one hemoglobin
/// mapping, and one row without any FinRegistry statistics.
pub fn create_harmonization_csv(dir: &Path) -> PathBuf {
    write_lines(
        dir,
        "harmonization.csv",
        &[
            HARMONIZATION_HEADER,
            "3020564,Creatinine,1234,p-krea,umol/l,900,5000,",
            "3020564,Creatinine,1234,p-krea,mmol/l,10,40,legacy unit",
            "3000963,Hemoglobin,2474,b-hb,g/l,800,3000,",
            "3000963,Hemoglobin,9999,b-hb-x,g/l,5,5,no stats",
        ],
    )
}

/// FinRegistry statistics matching [`create_harmonization_csv`]
pub fn create_stats_csv(dir: &Path) -> PathBuf {
    write_lines(
        dir,
        "stats.csv",
        &[
            STATS_HEADER,
            "3020564,1234,p-krea,umol/l,80,300,900",
            "3020564,1234,p-krea,umol/l,75,300,1200",
            "3020564,1234,p-krea,umol/l,90,120,400",
            "3020564,1234,p-krea,mmol/l,0.08,10,40",
            "3000963,2474,b-hb,g/l,140,500,2000",
            "3000963,2474,b-hb,g/l,150,300,1000",
            // Stats-only key: no harmonization row carries it
            "4000000,1,x,y,7,1,1",
        ],
    )
}

/// Create a temporary directory holding both fixture tables
pub fn create_fixture_dir() -> (TempDir, PathBuf, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let harmonization = create_harmonization_csv(temp_dir.path());
    let stats = create_stats_csv(temp_dir.path());
    (temp_dir, harmonization, stats)
}

/// Build a statistics row for `key`
pub fn stat(key: &LabKey, value: &str, n_people: u64, n_records: u64) -> LabValueStat {
    LabValueStat {
        key: key.clone(),
        value: value.to_string(),
        n_people,
        n_records,
    }
}

/// `(group, count)` rows for a single group
pub fn group_rows(group: &str, counts: &[u64]) -> Vec<(String, u64)> {
    counts.iter().map(|&c| (group.to_string(), c)).collect()
}
