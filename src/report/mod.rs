//! Report module - summarizing run results

pub mod summary;

pub use summary::*;
