//! labmerge: Kanta lab harmonization table enrichment
//!
//! Adds derived columns to the lab harmonization table: the most prevalent
//! lab values per harmonization key, and a flag marking the rows that cover
//! the first 90% of each OMOP concept's records.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
