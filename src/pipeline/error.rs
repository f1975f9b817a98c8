//! Error types for table validation and count parsing.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised while reading typed values out of an input table.
#[derive(Debug, Error)]
pub enum TableError {
    /// A column the transform depends on is absent from the input.
    #[error("Required column '{column}' not found")]
    MissingColumn { column: String },

    /// A count cell is empty or not a non-negative integer.
    ///
    /// `row` is the 1-based data row (the header is not counted).
    #[error("Column '{column}' row {row}: '{value}' is not a non-negative integer")]
    InvalidCount {
        column: String,
        row: usize,
        value: String,
    },

    /// The column a transform appends is already present in the input.
    #[error("Column '{column}' already exists in the input table")]
    ColumnExists { column: String },

    #[error(transparent)]
    Polars(#[from] PolarsError),
}

impl TableError {
    pub fn missing_column(column: &str) -> Self {
        TableError::MissingColumn {
            column: column.to_string(),
        }
    }
}
