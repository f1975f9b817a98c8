//! Command-line argument definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// labmerge - Add new columns to the Kanta lab harmonization table
#[derive(Parser, Debug)]
#[command(name = "labmerge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the harmonization table (CSV or Parquet)
    #[arg(long)]
    pub harmonization_table: PathBuf,

    /// Path to output file of merged table (CSV or Parquet, determined by extension)
    #[arg(long)]
    pub output: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add the top 10 lab values for each row
    #[command(name = "add_top10_lab_values")]
    AddTop10LabValues {
        /// Path to FinRegistry stats on Kanta lab values (CSV or Parquet)
        #[arg(long)]
        finregistry_stats: PathBuf,

        /// Number of lab values kept per harmonization key
        #[arg(long, default_value = "10", value_parser = validate_top_n)]
        top_n: usize,
    },

    /// Flag rows that make 90% of the records of each OMOP ID
    #[command(name = "keep_90percent")]
    Keep90Percent {
        /// Cumulative coverage percentage to reach within each OMOP ID (0-100]
        #[arg(long, default_value = "90", value_parser = validate_coverage_percent)]
        threshold: f64,
    },
}

/// Validator for top_n parameter
fn validate_top_n(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid count", s))?;

    if value == 0 {
        Err("top_n must be at least 1".to_string())
    } else {
        Ok(value)
    }
}

/// Validator for threshold parameter
fn validate_coverage_percent(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if value > 0.0 && value <= 100.0 {
        Ok(value)
    } else {
        Err(format!(
            "threshold must be greater than 0 and at most 100, got {}",
            value
        ))
    }
}
